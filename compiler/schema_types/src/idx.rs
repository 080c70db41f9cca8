//! Type index handle.
//!
//! `Idx` is the only way to refer to a type. All types are stored in the
//! [`Pool`](crate::Pool) and referenced by their 32-bit index.
//!
//! - Primitive types have fixed indices (0-7)
//! - Identity comparison is O(1) index comparison
//! - Copy, lightweight passing

use std::fmt;

use crate::Primitive;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types (indices 0-7) ===
    // Pre-allocated at pool creation, in `Primitive` declaration order.

    /// The `null` type.
    pub const NULL: Self = Self(0);
    /// The `boolean` type.
    pub const BOOLEAN: Self = Self(1);
    /// The `int` type (32-bit signed integer).
    pub const INT: Self = Self(2);
    /// The `long` type (64-bit signed integer).
    pub const LONG: Self = Self(3);
    /// The `float` type (32-bit IEEE 754).
    pub const FLOAT: Self = Self(4);
    /// The `double` type (64-bit IEEE 754).
    pub const DOUBLE: Self = Self(5);
    /// The `bytes` type.
    pub const BYTES: Self = Self(6);
    /// The `string` type.
    pub const STRING: Self = Self(7);

    /// Number of pre-allocated primitive types.
    pub const PRIMITIVE_COUNT: u32 = 8;

    /// First index for dynamically allocated types.
    pub const FIRST_DYNAMIC: u32 = Self::PRIMITIVE_COUNT;

    /// Create an index from a raw u32 value.
    ///
    /// The caller must ensure the index is valid in the pool it is used with.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a primitive type (pre-allocated).
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    /// The primitive at this index, if any.
    #[inline]
    pub const fn primitive(self) -> Option<Primitive> {
        Primitive::from_raw(self.0)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primitive() {
            Some(p) => write!(f, "Idx::{}", p.name().to_uppercase()),
            None => write!(f, "Idx({})", self.0),
        }
    }
}

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primitive() {
            Some(p) => write!(f, "{}", p.name()),
            None => write!(f, "type#{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_indices_match_declaration_order() {
        assert_eq!(Idx::NULL.raw(), 0);
        assert_eq!(Idx::BOOLEAN.raw(), 1);
        assert_eq!(Idx::INT.raw(), 2);
        assert_eq!(Idx::LONG.raw(), 3);
        assert_eq!(Idx::FLOAT.raw(), 4);
        assert_eq!(Idx::DOUBLE.raw(), 5);
        assert_eq!(Idx::BYTES.raw(), 6);
        assert_eq!(Idx::STRING.raw(), 7);
    }

    #[test]
    fn primitive_check_works() {
        assert!(Idx::NULL.is_primitive());
        assert!(Idx::STRING.is_primitive());
        assert!(!Idx::from_raw(Idx::FIRST_DYNAMIC).is_primitive());
        assert!(!Idx::from_raw(1000).is_primitive());
    }

    #[test]
    fn primitive_lookup_by_index() {
        assert_eq!(Idx::LONG.primitive(), Some(Primitive::Long));
        assert_eq!(Idx::from_raw(1000).primitive(), None);
    }

    #[test]
    fn display_and_debug() {
        assert_eq!(Idx::INT.to_string(), "int");
        assert_eq!(Idx::from_raw(42).to_string(), "type#42");
        assert_eq!(format!("{:?}", Idx::BYTES), "Idx::BYTES");
        assert_eq!(format!("{:?}", Idx::from_raw(42)), "Idx(42)");
    }
}
