//! Thread-safe shared handle to a [`Pool`].

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{Field, FullName, Idx, Pool, Tag, TypeData};

/// Shared, lockable pool.
///
/// Clones share the same arena. The convenience constructors lock for the
/// duration of a single allocation; use [`SharedPool::write`] to build many
/// types under one lock.
#[derive(Clone, Debug, Default)]
pub struct SharedPool(Arc<RwLock<Pool>>);

impl SharedPool {
    pub fn new() -> Self {
        SharedPool(Arc::new(RwLock::new(Pool::new())))
    }

    /// Lock the pool for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, Pool> {
        self.0.read()
    }

    /// Lock the pool for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, Pool> {
        self.0.write()
    }

    /// Check whether two handles share one arena.
    pub fn ptr_eq(&self, other: &SharedPool) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn record(&self, name: impl Into<FullName>, fields: Vec<Field>) -> Idx {
        self.write().record(name, fields)
    }

    pub fn enumeration(
        &self,
        name: impl Into<FullName>,
        symbols: Vec<String>,
        default: Option<String>,
    ) -> Idx {
        self.write().enumeration(name, symbols, default)
    }

    pub fn fixed(&self, name: impl Into<FullName>, size: usize) -> Idx {
        self.write().fixed(name, size)
    }

    pub fn array(&self, items: Idx) -> Idx {
        self.write().array(items)
    }

    pub fn map(&self, values: Idx) -> Idx {
        self.write().map(values)
    }

    pub fn union(&self, branches: impl IntoIterator<Item = Idx>) -> Idx {
        self.write().union(branches)
    }

    pub fn placeholder(&self, name: impl Into<FullName>) -> Idx {
        self.write().placeholder(name)
    }

    pub fn set_fields(&self, record: Idx, fields: Vec<Field>) -> bool {
        self.write().set_fields(record, fields)
    }

    /// Snapshot of a type's data.
    pub fn get(&self, idx: Idx) -> TypeData {
        self.read().get(idx).clone()
    }

    pub fn tag(&self, idx: Idx) -> Tag {
        self.read().tag(idx)
    }

    pub fn full_name(&self, idx: Idx) -> Option<FullName> {
        self.read().full_name(idx).cloned()
    }

    pub fn structurally_eq(&self, a: Idx, b: Idx) -> bool {
        self.read().structurally_eq(a, b)
    }

    pub fn format_type(&self, idx: Idx) -> String {
        self.read().format_type(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_arena() {
        let pool = SharedPool::new();
        let other = pool.clone();
        let rec = pool.record("Shared", vec![]);

        assert!(pool.ptr_eq(&other));
        assert_eq!(other.tag(rec), Tag::Record);
        assert_eq!(other.full_name(rec), Some(FullName::new("Shared")));
        assert!(!pool.ptr_eq(&SharedPool::new()));
    }

    #[test]
    fn handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedPool>();
    }
}
