//! Forward-reference fixup.
//!
//! Building a document in declaration order cannot produce self- or
//! mutually-referential named types, so references to names that are not
//! registered yet are embedded as placeholders. Once the whole batch is
//! built, this pass:
//!
//! 1. registers every declared type (`put`), aborting on any failure,
//! 2. walks the graph reachable from the declared types, from any root
//!    references (anonymous document roots, which are never registered)
//!    and from every message parameter, response and error,
//! 3. re-resolves each placeholder against the now complete tables and
//!    redirects the referring slot to the registered type by identity.
//!
//! The pass is all-or-nothing: if any placeholder is still unresolved no
//! slot is changed.

use rustc_hash::{FxHashMap, FxHashSet};
use schema_types::{Field, FullName, Idx, Pool, Primitive, Slot, TypeData};

use crate::registry::Tables;
use crate::{RegistryError, TypeRegistry};

/// A message of an RPC-style protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub name: String,
    /// Request parameters, in declaration order.
    pub request: Vec<Field>,
    pub response: Idx,
    /// Declared error types.
    pub errors: Vec<Idx>,
    pub one_way: bool,
}

/// Position of a type reference inside a [`Message`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MessageSlot {
    Param(usize),
    Response,
    Error(usize),
}

impl Message {
    pub fn new(name: impl Into<String>, request: Vec<Field>, response: Idx) -> Self {
        Message {
            name: name.into(),
            request,
            response,
            errors: Vec::new(),
            one_way: false,
        }
    }

    #[must_use]
    pub fn with_errors(mut self, errors: Vec<Idx>) -> Self {
        self.errors = errors;
        self
    }

    /// Mark the message as one-way (no response is sent).
    #[must_use]
    pub fn one_way(mut self) -> Self {
        self.one_way = true;
        self.response = Idx::NULL;
        self
    }

    /// Every type reference in the message, in declaration order.
    pub fn slots(&self) -> Vec<(MessageSlot, Idx)> {
        let params = self
            .request
            .iter()
            .enumerate()
            .map(|(i, f)| (MessageSlot::Param(i), f.ty));
        let errors = self
            .errors
            .iter()
            .enumerate()
            .map(|(i, ty)| (MessageSlot::Error(i), *ty));
        params
            .chain(std::iter::once((MessageSlot::Response, self.response)))
            .chain(errors)
            .collect()
    }

    fn slot_mut(&mut self, slot: MessageSlot) -> Option<&mut Idx> {
        match slot {
            MessageSlot::Param(i) => self.request.get_mut(i).map(|f| &mut f.ty),
            MessageSlot::Response => Some(&mut self.response),
            MessageSlot::Error(i) => self.errors.get_mut(i),
        }
    }
}

/// An RPC-style protocol: a batch of named types plus messages referring
/// to them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Protocol {
    pub name: FullName,
    /// Named types declared by the protocol, in declaration order.
    pub types: Vec<Idx>,
    pub messages: Vec<Message>,
}

impl Protocol {
    pub fn new(name: impl Into<FullName>) -> Self {
        Protocol {
            name: name.into(),
            types: Vec::new(),
            messages: Vec::new(),
        }
    }
}

/// A substitution found by the walk, applied only if the walk succeeds.
enum Edit {
    Type { owner: Idx, slot: Slot, target: Idx },
    Root { root: usize, target: Idx },
    Message { message: usize, slot: MessageSlot, target: Idx },
}

/// Walks the type graph and records the substitutions placeholders need.
struct Linker<'a> {
    registry: &'a TypeRegistry,
    tables: &'a Tables,
    pool: &'a Pool,
    visited: FxHashSet<Idx>,
    worklist: Vec<Idx>,
    /// Cache of placeholder name → registered type.
    targets: FxHashMap<FullName, Option<Idx>>,
    unresolved: Vec<FullName>,
    edits: Vec<Edit>,
}

impl<'a> Linker<'a> {
    fn new(registry: &'a TypeRegistry, tables: &'a Tables, pool: &'a Pool) -> Self {
        Linker {
            registry,
            tables,
            pool,
            visited: FxHashSet::default(),
            worklist: Vec::new(),
            targets: FxHashMap::default(),
            unresolved: Vec::new(),
            edits: Vec::new(),
        }
    }

    /// Visit a reference. Returns the substitute if `ty` is a placeholder
    /// whose name is now registered.
    fn link(&mut self, ty: Idx) -> Option<Idx> {
        let pool = self.pool;
        match pool.get(ty) {
            TypeData::Unresolved(name) => {
                let target = self.target(name)?;
                self.enqueue(target);
                Some(target)
            }
            _ => {
                self.enqueue(ty);
                None
            }
        }
    }

    fn enqueue(&mut self, ty: Idx) {
        if self.visited.insert(ty) {
            self.worklist.push(ty);
        }
    }

    fn target(&mut self, name: &FullName) -> Option<Idx> {
        if let Some(cached) = self.targets.get(name) {
            return *cached;
        }

        let target = match Primitive::from_name(name.as_str()) {
            Some(primitive) => Some(primitive.idx()),
            None => {
                let full_name = self.registry.resolve_full_name(name.as_str(), None);
                self.tables.lookup(name.as_str(), &full_name)
            }
        };

        if target.is_none() {
            tracing::debug!(%name, "unresolved reference");
            self.unresolved.push(name.clone());
        }
        self.targets.insert(name.clone(), target);
        target
    }

    fn run(&mut self) {
        while let Some(owner) = self.worklist.pop() {
            for (slot, child) in self.pool.children(owner) {
                if let Some(target) = self.link(child) {
                    self.edits.push(Edit::Type {
                        owner,
                        slot,
                        target,
                    });
                }
            }
        }
    }
}

impl TypeRegistry {
    /// Register `types` and resolve every placeholder reachable from them,
    /// from `roots` or from `messages`.
    ///
    /// `roots` are walked but never registered: a document whose top-level
    /// type is a union or array passes it here. A root that is itself a
    /// placeholder is rewritten in place.
    ///
    /// Returns the number of substituted references. On failure nothing is
    /// substituted, but types registered before the failure stay pending:
    /// the caller is expected to roll back.
    #[tracing::instrument(level = "debug", skip_all, fields(
        types = types.len(),
        roots = roots.len(),
        messages = messages.len(),
    ))]
    pub fn resolve_batch(
        &self,
        types: &[Idx],
        roots: &mut [Idx],
        messages: &mut [Message],
    ) -> Result<usize, Vec<RegistryError>> {
        let errors: Vec<RegistryError> = types.iter().filter_map(|&ty| self.put(ty).err()).collect();
        if !errors.is_empty() {
            return Err(errors);
        }

        let tables = self.tables().read();
        let mut pool = self.pool().write();

        let (edits, unresolved) = {
            let mut linker = Linker::new(self, &tables, &pool);
            for (root, &ty) in roots.iter().enumerate() {
                if let Some(target) = linker.link(ty) {
                    linker.edits.push(Edit::Root { root, target });
                }
            }
            for (message, m) in messages.iter().enumerate() {
                for (slot, ty) in m.slots() {
                    if let Some(target) = linker.link(ty) {
                        linker.edits.push(Edit::Message {
                            message,
                            slot,
                            target,
                        });
                    }
                }
            }
            for &ty in types {
                linker.enqueue(ty);
            }
            linker.run();
            (linker.edits, linker.unresolved)
        };

        if !unresolved.is_empty() {
            return Err(unresolved
                .into_iter()
                .map(|full_name| RegistryError::UnresolvedReference { full_name })
                .collect());
        }

        let substituted = edits.len();
        for edit in edits {
            match edit {
                Edit::Type {
                    owner,
                    slot,
                    target,
                } => {
                    pool.replace_child(owner, slot, target);
                }
                Edit::Root { root, target } => roots[root] = target,
                Edit::Message {
                    message,
                    slot,
                    target,
                } => {
                    if let Some(ty) = messages[message].slot_mut(slot) {
                        *ty = target;
                    }
                }
            }
        }

        tracing::debug!(substituted, "forward references resolved");
        Ok(substituted)
    }

    /// Register a document's named types and resolve its forward references.
    pub fn resolve_types(&self, types: &[Idx]) -> Result<usize, Vec<RegistryError>> {
        self.resolve_batch(types, &mut [], &mut [])
    }

    /// Like [`TypeRegistry::resolve_types`], for a document whose top-level
    /// types are not all named. `roots` are linked but not registered.
    pub fn resolve_document(
        &self,
        types: &[Idx],
        roots: &mut [Idx],
    ) -> Result<usize, Vec<RegistryError>> {
        self.resolve_batch(types, roots, &mut [])
    }

    /// Register a protocol's types and resolve forward references in the
    /// types and in every message.
    pub fn resolve_protocol(&self, protocol: &mut Protocol) -> Result<usize, Vec<RegistryError>> {
        self.resolve_batch(&protocol.types, &mut [], &mut protocol.messages)
    }
}
