//! Registry of named types with a committed table and a pending overlay.
//!
//! # Design
//!
//! - Two ordered tables keyed by full name: `committed` (durable, visible to
//!   every later session) and `pending` (the session in progress)
//! - `commit` merges pending into committed; `rollback` discards pending,
//!   so a failed parse never needs to snapshot or restore anything
//! - A registry handle is a namespace view: clones and derived views share
//!   the tables, validator and type pool, and differ only in namespace
//!
//! # Locking
//!
//! Tables and pool each sit behind a `parking_lot::RwLock`. When both are
//! needed the tables lock is always taken first.

use std::fmt;
use std::sync::Arc;

use indexmap::map::Entry;
use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;
use schema_types::{is_primitive_name, Field, FullName, Idx, Primitive, SharedPool};

use crate::names::{expand_name, simple_name};
use crate::{NamePart, NameValidator, RegistryConfig, RegistryError, Session};

/// Ordered map from full name to registered type.
pub type TypesByName = IndexMap<FullName, Idx, FxBuildHasher>;

#[derive(Debug, Default)]
pub(crate) struct Tables {
    committed: TypesByName,
    pending: TypesByName,
}

impl Tables {
    fn get(&self, name: &str) -> Option<Idx> {
        self.committed
            .get(name)
            .or_else(|| self.pending.get(name))
            .copied()
    }

    /// Look up `full_name`, then fall back to the unqualified `name` in the
    /// root namespace.
    pub(crate) fn lookup(&self, name: &str, full_name: &FullName) -> Option<Idx> {
        self.get(full_name.as_str()).or_else(|| self.get(name))
    }
}

struct Shared {
    tables: RwLock<Tables>,
    pool: SharedPool,
    validator: Arc<dyn NameValidator>,
    default_namespace: Option<Arc<str>>,
}

/// Name-resolving, transactional registry of named types.
///
/// Cloning a registry or deriving a view with [`TypeRegistry::with_namespace`]
/// yields another handle to the same tables.
#[derive(Clone)]
pub struct TypeRegistry {
    shared: Arc<Shared>,
    /// Namespace used to expand bare names through this view.
    namespace: Option<Arc<str>>,
}

impl TypeRegistry {
    /// Create an empty registry with its own type pool.
    pub fn new(config: &RegistryConfig) -> Self {
        Self::with_parts(config, config.validator.validator(), SharedPool::new())
    }

    /// Create an empty registry with a custom name validator.
    pub fn with_validator(config: &RegistryConfig, validator: Arc<dyn NameValidator>) -> Self {
        Self::with_parts(config, validator, SharedPool::new())
    }

    /// Create an empty registry over an existing pool.
    pub fn with_pool(config: &RegistryConfig, pool: SharedPool) -> Self {
        Self::with_parts(config, config.validator.validator(), pool)
    }

    fn with_parts(
        config: &RegistryConfig,
        validator: Arc<dyn NameValidator>,
        pool: SharedPool,
    ) -> Self {
        let namespace: Option<Arc<str>> = config.effective_namespace().map(Arc::from);
        TypeRegistry {
            shared: Arc::new(Shared {
                tables: RwLock::new(Tables::default()),
                pool,
                validator,
                default_namespace: namespace.clone(),
            }),
            namespace,
        }
    }

    // === Views ===

    /// Derive a view that expands bare names against `namespace`.
    ///
    /// The view shares this registry's tables, validator and pool. An empty
    /// or absent namespace falls back to the registry's default namespace,
    /// not to this view's.
    #[must_use]
    pub fn with_namespace(&self, namespace: Option<&str>) -> Self {
        let namespace = match namespace {
            Some(ns) if !ns.is_empty() => Some(Arc::from(ns)),
            _ => self.shared.default_namespace.clone(),
        };
        TypeRegistry {
            shared: Arc::clone(&self.shared),
            namespace,
        }
    }

    /// The namespace bare names are expanded against through this view.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The namespace the registry was constructed with.
    pub fn default_namespace(&self) -> Option<&str> {
        self.shared.default_namespace.as_deref()
    }

    /// Check whether two handles share one set of tables.
    pub fn shares_tables_with(&self, other: &TypeRegistry) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// The pool holding every type this registry hands out.
    pub fn pool(&self) -> &SharedPool {
        &self.shared.pool
    }

    pub fn validator(&self) -> &dyn NameValidator {
        &*self.shared.validator
    }

    // === Names ===

    /// Expand `name` to a canonical full name.
    ///
    /// Bare names are qualified with `space` when it is non-empty, otherwise
    /// with this view's namespace. Primitive and dotted names are returned
    /// unchanged. Never fails and never touches the tables.
    pub fn resolve_full_name(&self, name: &str, space: Option<&str>) -> FullName {
        let space = space.filter(|s| !s.is_empty()).or(self.namespace());
        expand_name(name, space)
    }

    /// The simplest name referring to `full_name` from this view's namespace.
    pub fn simple_name<'a>(&self, full_name: &'a str) -> &'a str {
        simple_name(full_name, self.namespace())
    }

    // === Lookup ===

    /// Resolve a type reference.
    ///
    /// 1. Primitive keywords map to their fixed primitive type.
    /// 2. The expanded full name is looked up in committed, then pending.
    /// 3. The bare `name` is looked up the same way (root namespace).
    /// 4. Otherwise a new placeholder tagged with the expanded full name is
    ///    returned, to be replaced by the fixup pass.
    pub fn resolve(&self, name: &str) -> Idx {
        if let Some(primitive) = Primitive::from_name(name) {
            return primitive.idx();
        }

        let full_name = self.resolve_full_name(name, None);
        let found = self.shared.tables.read().lookup(name, &full_name);
        if let Some(idx) = found {
            tracing::trace!(name, %full_name, %idx, "resolved");
            return idx;
        }

        tracing::trace!(name, %full_name, "forward reference");
        self.shared.pool.placeholder(full_name)
    }

    /// Like [`TypeRegistry::resolve`], but returns `None` instead of
    /// allocating a placeholder.
    pub fn lookup(&self, name: &str) -> Option<Idx> {
        if let Some(primitive) = Primitive::from_name(name) {
            return Some(primitive.idx());
        }
        let full_name = self.resolve_full_name(name, None);
        self.shared.tables.read().lookup(name, &full_name)
    }

    /// Check whether `name` is a primitive keyword or a registered full
    /// name. No namespace expansion takes place.
    pub fn contains(&self, name: &str) -> bool {
        is_primitive_name(name) || self.shared.tables.read().get(name).is_some()
    }

    /// Snapshot of all registered types: committed first, then pending, each
    /// in registration order.
    pub fn types_by_name(&self) -> TypesByName {
        let tables = self.shared.tables.read();
        let mut all = tables.committed.clone();
        all.extend(tables.pending.iter().map(|(name, idx)| (name.clone(), *idx)));
        all
    }

    /// Number of registered types, committed and pending.
    pub fn len(&self) -> usize {
        let tables = self.shared.tables.read();
        tables.committed.len() + tables.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render a type, naming registered types relative to this view.
    pub fn describe(&self, idx: Idx) -> String {
        self.shared
            .pool
            .read()
            .format_type_with(idx, &|name: &FullName| self.simple_name(name.as_str()).to_owned())
    }

    // === Registration ===

    /// Register a named type in the pending table.
    ///
    /// Idempotent: registering a structurally equal type under a name that is
    /// already bound succeeds and leaves the existing binding in place.
    pub fn put(&self, ty: Idx) -> Result<(), RegistryError> {
        let mut tables = self.shared.tables.write();
        let pool = self.shared.pool.read();

        let data = pool.get(ty);
        let Some(full_name) = data.full_name() else {
            return Err(RegistryError::InvalidRegistration { kind: data.tag() });
        };

        self.validate_full_name(full_name)?;

        if is_primitive_name(full_name.as_str()) {
            return Err(RegistryError::Redefinition {
                full_name: full_name.clone(),
            });
        }

        if let Some(&known) = tables.committed.get(full_name) {
            return if pool.structurally_eq(ty, known) {
                tracing::trace!(%full_name, "already committed");
                Ok(())
            } else {
                Err(RegistryError::Redefinition {
                    full_name: full_name.clone(),
                })
            };
        }

        match tables.pending.entry(full_name.clone()) {
            Entry::Occupied(entry) => {
                if pool.structurally_eq(ty, *entry.get()) {
                    tracing::trace!(%full_name, "already pending");
                    Ok(())
                } else {
                    Err(RegistryError::Redefinition {
                        full_name: full_name.clone(),
                    })
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(ty);
                tracing::debug!(%full_name, idx = %ty, "registered");
                Ok(())
            }
        }
    }

    /// Fill in the fields of a record shell, typically one registered before
    /// its fields were built so they can refer to it.
    ///
    /// Returns `false` (and changes nothing) if `record` is bound in the
    /// committed table, is not a record, or already has fields.
    pub fn set_fields(&self, record: Idx, fields: Vec<Field>) -> bool {
        let tables = self.shared.tables.read();
        let mut pool = self.shared.pool.write();

        let committed = pool
            .full_name(record)
            .is_some_and(|name| tables.committed.get(name) == Some(&record));
        if committed {
            tracing::debug!(%record, "committed record is immutable");
            return false;
        }
        pool.set_fields(record, fields)
    }

    fn validate_full_name(&self, full_name: &FullName) -> Result<(), RegistryError> {
        let (namespace, local) = full_name.split();
        let namespace_parts = namespace
            .into_iter()
            .flat_map(|ns| ns.split('.'))
            .map(|segment| (NamePart::Namespace, segment));

        for (part, segment) in namespace_parts.chain(std::iter::once((NamePart::Name, local))) {
            if let Err(violations) = self.shared.validator.validate(segment) {
                return Err(RegistryError::NameValidation {
                    full_name: full_name.clone(),
                    part,
                    segment: segment.to_owned(),
                    violations,
                });
            }
        }
        Ok(())
    }

    /// Register already-built named types and commit them.
    ///
    /// Any pending registrations are committed along with them. If any type
    /// fails to register, the pending table is rolled back and every error
    /// is returned.
    pub fn add_types(&self, types: impl IntoIterator<Item = Idx>) -> Result<(), Vec<RegistryError>> {
        let errors: Vec<RegistryError> = types.into_iter().filter_map(|ty| self.put(ty).err()).collect();
        if errors.is_empty() {
            self.commit();
            Ok(())
        } else {
            self.rollback();
            Err(errors)
        }
    }

    // === Transactions ===

    /// Check whether registrations are waiting to be committed.
    pub fn has_pending(&self) -> bool {
        !self.shared.tables.read().pending.is_empty()
    }

    /// Promote every pending registration to the committed table, keeping
    /// registration order.
    pub fn commit(&self) {
        let mut tables = self.shared.tables.write();
        let pending = std::mem::take(&mut tables.pending);
        let count = pending.len();
        tables.committed.extend(pending);
        tracing::debug!(count, total = tables.committed.len(), "commit");
    }

    /// Discard every registration made since the last commit.
    pub fn rollback(&self) {
        let mut tables = self.shared.tables.write();
        let count = tables.pending.len();
        tables.pending.clear();
        tracing::debug!(count, "rollback");
    }

    /// Start a session that rolls back on drop unless committed.
    pub fn session(&self) -> Session<'_> {
        Session::new(self)
    }

    pub(crate) fn tables(&self) -> &RwLock<Tables> {
        &self.shared.tables
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(&RegistryConfig::default())
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tables = self.shared.tables.read();
        f.debug_struct("TypeRegistry")
            .field("namespace", &self.namespace)
            .field("committed", &tables.committed.len())
            .field("pending", &tables.pending.len())
            .field("validator", &self.shared.validator)
            .finish()
    }
}
