//! Type kind discriminant.

use std::fmt;

/// The kind of a type stored in the pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tag {
    Primitive,
    Record,
    Enum,
    Fixed,
    Array,
    Map,
    Union,
    /// Placeholder for a name that has not been registered yet.
    Unresolved,
}

impl Tag {
    /// Named kinds carry their own full name and may be registered.
    #[inline]
    pub const fn is_named(self) -> bool {
        matches!(self, Tag::Record | Tag::Enum | Tag::Fixed)
    }

    /// Anonymous composites: never registered by name.
    #[inline]
    pub const fn is_anonymous(self) -> bool {
        matches!(self, Tag::Array | Tag::Map | Tag::Union)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Tag::Primitive => "primitive",
            Tag::Record => "record",
            Tag::Enum => "enum",
            Tag::Fixed => "fixed",
            Tag::Array => "array",
            Tag::Map => "map",
            Tag::Union => "union",
            Tag::Unresolved => "unresolved reference",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
