//! Name resolution and transactional type registration for schema
//! definitions.
//!
//! A grammar-level parser feeds declarations into a [`TypeRegistry`]:
//!
//! ```text
//! parser ──▶ resolve_full_name ──▶ put (pending)
//!        └─▶ resolve(reference) ──▶ real type | placeholder
//!
//! whole document built ──▶ resolve_batch (fixup) ──▶ commit | rollback
//! ```
//!
//! References to types that are declared later, or to the type currently
//! being declared, resolve to placeholders. Once the whole document (or a
//! batch of related documents, such as a protocol) is built, the fixup pass
//! replaces every placeholder with the registered type by identity.
//!
//! # Sharing
//!
//! A registry handle is cheap to clone. Clones and namespace views created
//! with [`TypeRegistry::with_namespace`] share the same committed and
//! pending tables: a registration through any of them is visible to all.
//! Table mutation is internally locked, but independent sessions sharing a
//! registry must still be serialized by the caller (single writer).

mod config;
mod error;
mod fixup;
mod names;
mod registry;
mod session;
mod validate;

pub use config::RegistryConfig;
pub use error::{NamePart, RegistryError};
pub use fixup::{Message, MessageSlot, Protocol};
pub use names::{expand_name, simple_name};
pub use registry::{TypeRegistry, TypesByName};
pub use session::Session;
pub use validate::{
    NameValidator, NoValidation, StrictValidator, UtfValidator, ValidatorKind, Violation,
};

pub use schema_types::{
    Field, FullName, Idx, Pool, Primitive, SharedPool, Slot, Tag, TypeData,
};
