//! Type pool for schema definitions.
//!
//! All types live in a single append-only [`Pool`] and are referenced by
//! 32-bit [`Idx`] handles. Referring to a type by handle is what makes
//! self- and mutually-recursive named types representable: a record field
//! holds the `Idx` of its type, so a record can point at itself.
//!
//! # Kinds
//!
//! - Primitives are pre-allocated at fixed indices (see [`Primitive`])
//! - Named types (record, enum, fixed) carry their own [`FullName`]
//! - Anonymous composites (array, map, union) are never registered by name
//! - Placeholders stand in for names that are not known yet and are
//!   replaced by identity once the name is registered

mod format;
mod idx;
mod name;
mod pool;
mod primitive;
mod shared;
mod stack;
mod tag;

pub use idx::Idx;
pub use name::FullName;
pub use pool::{Field, Pool, Slot, TypeData};
pub use primitive::{is_primitive_name, Primitive, PRIMITIVES};
pub use shared::SharedPool;
pub use tag::Tag;

// Size assertions to prevent accidental regressions.
// Idx is embedded in every field and container; keep it a bare u32.
const _: () = assert!(std::mem::size_of::<Idx>() == 4);
