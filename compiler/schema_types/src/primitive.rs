//! The eight primitive schema types.
//!
//! The primitive set is process-wide and immutable. Primitive names are
//! checked before any namespace expansion and can never be shadowed by a
//! registered type.

use std::fmt;

use crate::Idx;

/// A primitive (unnamed, built-in) schema type.
///
/// Declaration order fixes each primitive's [`Idx`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Primitive {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

/// Every primitive, in index order.
pub const PRIMITIVES: [Primitive; 8] = [
    Primitive::Null,
    Primitive::Boolean,
    Primitive::Int,
    Primitive::Long,
    Primitive::Float,
    Primitive::Double,
    Primitive::Bytes,
    Primitive::String,
];

impl Primitive {
    /// The keyword naming this primitive.
    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Null => "null",
            Primitive::Boolean => "boolean",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Bytes => "bytes",
            Primitive::String => "string",
        }
    }

    /// Look up a primitive by its exact (case-sensitive) keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "null" => Some(Primitive::Null),
            "boolean" => Some(Primitive::Boolean),
            "int" => Some(Primitive::Int),
            "long" => Some(Primitive::Long),
            "float" => Some(Primitive::Float),
            "double" => Some(Primitive::Double),
            "bytes" => Some(Primitive::Bytes),
            "string" => Some(Primitive::String),
            _ => None,
        }
    }

    /// The fixed pool index of this primitive.
    #[inline]
    pub const fn idx(self) -> Idx {
        Idx::from_raw(self as u32)
    }

    pub(crate) const fn from_raw(raw: u32) -> Option<Self> {
        if raw < Idx::PRIMITIVE_COUNT {
            Some(PRIMITIVES[raw as usize])
        } else {
            None
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check whether `name` is exactly one of the primitive keywords.
#[inline]
pub fn is_primitive_name(name: &str) -> bool {
    Primitive::from_name(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for p in PRIMITIVES {
            assert_eq!(Primitive::from_name(p.name()), Some(p));
        }
    }

    #[test]
    fn index_matches_position() {
        for (i, p) in PRIMITIVES.iter().enumerate() {
            assert_eq!(p.idx().raw() as usize, i);
            assert_eq!(p.idx().primitive(), Some(*p));
        }
    }

    #[test]
    fn primitive_names_are_case_sensitive() {
        assert!(is_primitive_name("string"));
        assert!(!is_primitive_name("String"));
        assert!(!is_primitive_name("INT"));
        assert!(!is_primitive_name("com.example.int"));
        assert!(!is_primitive_name(""));
    }
}
