//! Scoped parse session.

use std::ops::Deref;

use crate::TypeRegistry;

/// A parse session over a registry.
///
/// Registrations made through the session land in the registry's pending
/// table. Finish with [`Session::commit`]; dropping the session without
/// committing rolls the pending table back.
#[must_use = "a session that is dropped immediately rolls back"]
pub struct Session<'r> {
    registry: &'r TypeRegistry,
    finished: bool,
}

impl<'r> Session<'r> {
    pub(crate) fn new(registry: &'r TypeRegistry) -> Self {
        Session {
            registry,
            finished: false,
        }
    }

    /// Promote the session's registrations.
    pub fn commit(mut self) {
        self.registry.commit();
        self.finished = true;
    }

    /// Discard the session's registrations.
    pub fn rollback(mut self) {
        self.registry.rollback();
        self.finished = true;
    }
}

impl Deref for Session<'_> {
    type Target = TypeRegistry;

    fn deref(&self) -> &TypeRegistry {
        self.registry
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!("session dropped without commit");
            self.registry.rollback();
        }
    }
}
