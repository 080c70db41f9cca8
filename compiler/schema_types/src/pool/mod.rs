//! Append-only arena holding every type.
//!
//! The pool never removes or moves an entry, so an [`Idx`] stays valid for
//! the lifetime of the pool. Named types are mutated in exactly two ways:
//! a record's fields may be filled in once after allocation, and a child
//! slot pointing at a placeholder may be redirected to the real type.

use rustc_hash::FxHashSet;

use crate::stack::ensure_sufficient_stack;
use crate::{FullName, Idx, Primitive, Tag, PRIMITIVES};

/// A record field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub ty: Idx,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Idx) -> Self {
        Field {
            name: name.into(),
            ty,
        }
    }
}

/// Type representation stored in the pool.
///
/// Children are stored as [`Idx`], never inline, so identity and sharing are
/// preserved and cycles through named types are possible.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// Built-in primitive (pre-allocated at its fixed index).
    Primitive(Primitive),

    /// Record with ordered named fields.
    Record { name: FullName, fields: Vec<Field> },

    /// Enumeration of symbols with an optional default symbol.
    Enum {
        name: FullName,
        symbols: Vec<String>,
        default: Option<String>,
    },

    /// Fixed-size byte sequence.
    Fixed { name: FullName, size: usize },

    /// Array of items.
    Array(Idx),

    /// Map from string keys to values.
    Map(Idx),

    /// Union of branches, in declaration order.
    Union(Box<[Idx]>),

    /// Placeholder tagged with the full name it could not resolve.
    Unresolved(FullName),
}

impl TypeData {
    pub fn tag(&self) -> Tag {
        match self {
            TypeData::Primitive(_) => Tag::Primitive,
            TypeData::Record { .. } => Tag::Record,
            TypeData::Enum { .. } => Tag::Enum,
            TypeData::Fixed { .. } => Tag::Fixed,
            TypeData::Array(_) => Tag::Array,
            TypeData::Map(_) => Tag::Map,
            TypeData::Union(_) => Tag::Union,
            TypeData::Unresolved(_) => Tag::Unresolved,
        }
    }

    /// The intrinsic full name of a named type.
    pub fn full_name(&self) -> Option<&FullName> {
        match self {
            TypeData::Record { name, .. }
            | TypeData::Enum { name, .. }
            | TypeData::Fixed { name, .. } => Some(name),
            _ => None,
        }
    }

    /// The name a placeholder stands in for.
    pub fn unresolved_name(&self) -> Option<&FullName> {
        match self {
            TypeData::Unresolved(name) => Some(name),
            _ => None,
        }
    }
}

/// Position of a child reference inside its owning type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The type of the n-th record field.
    Field(usize),
    /// The item type of an array.
    Items,
    /// The value type of a map.
    Values,
    /// The n-th branch of a union.
    Branch(usize),
}

/// The type arena.
#[derive(Clone, Debug)]
pub struct Pool {
    items: Vec<TypeData>,
}

impl Pool {
    /// Create a pool with every primitive pre-allocated at its fixed index.
    pub fn new() -> Self {
        Pool {
            items: PRIMITIVES.iter().copied().map(TypeData::Primitive).collect(),
        }
    }

    fn push(&mut self, data: TypeData) -> Idx {
        let raw = u32::try_from(self.items.len())
            .unwrap_or_else(|_| panic!("type pool exceeded capacity of {} types", u32::MAX));
        self.items.push(data);
        Idx::from_raw(raw)
    }

    // === Construction ===

    /// Allocate a record. Fields may be left empty and filled in later with
    /// [`Pool::set_fields`] so the record can be registered before its
    /// fields are built.
    pub fn record(&mut self, name: impl Into<FullName>, fields: Vec<Field>) -> Idx {
        self.push(TypeData::Record {
            name: name.into(),
            fields,
        })
    }

    pub fn enumeration(
        &mut self,
        name: impl Into<FullName>,
        symbols: Vec<String>,
        default: Option<String>,
    ) -> Idx {
        self.push(TypeData::Enum {
            name: name.into(),
            symbols,
            default,
        })
    }

    pub fn fixed(&mut self, name: impl Into<FullName>, size: usize) -> Idx {
        self.push(TypeData::Fixed {
            name: name.into(),
            size,
        })
    }

    pub fn array(&mut self, items: Idx) -> Idx {
        self.push(TypeData::Array(items))
    }

    pub fn map(&mut self, values: Idx) -> Idx {
        self.push(TypeData::Map(values))
    }

    pub fn union(&mut self, branches: impl IntoIterator<Item = Idx>) -> Idx {
        self.push(TypeData::Union(branches.into_iter().collect()))
    }

    /// Allocate a fresh placeholder. Two placeholders for the same name are
    /// distinct entries.
    pub fn placeholder(&mut self, name: impl Into<FullName>) -> Idx {
        self.push(TypeData::Unresolved(name.into()))
    }

    /// Fill in the fields of a record shell allocated without any.
    ///
    /// Only meant for a shell still under construction. The pool does not
    /// know which records a registry has committed, so callers holding a
    /// registry should go through its `set_fields`, which refuses committed
    /// records.
    ///
    /// Returns `false` (and changes nothing) if `record` is not a record or
    /// already has fields.
    pub fn set_fields(&mut self, record: Idx, new_fields: Vec<Field>) -> bool {
        match &mut self.items[record.index()] {
            TypeData::Record { fields, .. } if fields.is_empty() => {
                *fields = new_fields;
                true
            }
            _ => false,
        }
    }

    // === Lookup ===

    /// Get the data for a type.
    ///
    /// # Panics
    /// Panics if `idx` was not allocated by this pool.
    #[inline]
    pub fn get(&self, idx: Idx) -> &TypeData {
        &self.items[idx.index()]
    }

    #[inline]
    pub fn tag(&self, idx: Idx) -> Tag {
        self.get(idx).tag()
    }

    #[inline]
    pub fn full_name(&self, idx: Idx) -> Option<&FullName> {
        self.get(idx).full_name()
    }

    /// Check whether `idx` is a placeholder.
    #[inline]
    pub fn is_unresolved(&self, idx: Idx) -> bool {
        matches!(self.get(idx), TypeData::Unresolved(_))
    }

    /// Number of types in the pool, primitives included.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`: primitives are allocated up front.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // === Graph structure ===

    /// Enumerate the child slots of a type, in declaration order.
    ///
    /// These are the positions the fixup pass may substitute.
    pub fn children(&self, idx: Idx) -> Vec<(Slot, Idx)> {
        match self.get(idx) {
            TypeData::Record { fields, .. } => fields
                .iter()
                .enumerate()
                .map(|(i, f)| (Slot::Field(i), f.ty))
                .collect(),
            TypeData::Array(items) => vec![(Slot::Items, *items)],
            TypeData::Map(values) => vec![(Slot::Values, *values)],
            TypeData::Union(branches) => branches
                .iter()
                .enumerate()
                .map(|(i, b)| (Slot::Branch(i), *b))
                .collect(),
            TypeData::Primitive(_)
            | TypeData::Enum { .. }
            | TypeData::Fixed { .. }
            | TypeData::Unresolved(_) => Vec::new(),
        }
    }

    /// Read the child at `slot`, if the slot exists.
    pub fn child(&self, idx: Idx, slot: Slot) -> Option<Idx> {
        match (self.get(idx), slot) {
            (TypeData::Record { fields, .. }, Slot::Field(i)) => fields.get(i).map(|f| f.ty),
            (TypeData::Array(items), Slot::Items) => Some(*items),
            (TypeData::Map(values), Slot::Values) => Some(*values),
            (TypeData::Union(branches), Slot::Branch(i)) => branches.get(i).copied(),
            _ => None,
        }
    }

    /// Redirect the child at `slot` to `new`.
    ///
    /// Returns `false` if `slot` does not exist on `idx`.
    pub fn replace_child(&mut self, idx: Idx, slot: Slot, new: Idx) -> bool {
        let target = match (&mut self.items[idx.index()], slot) {
            (TypeData::Record { fields, .. }, Slot::Field(i)) => fields.get_mut(i).map(|f| &mut f.ty),
            (TypeData::Array(items), Slot::Items) => Some(items),
            (TypeData::Map(values), Slot::Values) => Some(values),
            (TypeData::Union(branches), Slot::Branch(i)) => branches.get_mut(i),
            _ => None,
        };
        match target {
            Some(child) => {
                tracing::trace!(owner = %idx, ?slot, from = %*child, to = %new, "replace child");
                *child = new;
                true
            }
            None => false,
        }
    }

    // === Equality ===

    /// Structural equality.
    ///
    /// Identical indices are equal. Named types are equal when kind, name
    /// and contents match; recursion through a pair of named types already
    /// under comparison assumes equality, so cyclic types terminate.
    /// A placeholder equals another placeholder or named type with the same
    /// full name, since both denote the single type bound to that name.
    pub fn structurally_eq(&self, a: Idx, b: Idx) -> bool {
        let mut assumed = FxHashSet::default();
        self.eq_inner(a, b, &mut assumed)
    }

    fn eq_inner(&self, a: Idx, b: Idx, assumed: &mut FxHashSet<(Idx, Idx)>) -> bool {
        if a == b {
            return true;
        }
        ensure_sufficient_stack(|| match (self.get(a), self.get(b)) {
            (TypeData::Primitive(x), TypeData::Primitive(y)) => x == y,
            (TypeData::Unresolved(x), other) | (other, TypeData::Unresolved(x)) => {
                match other {
                    TypeData::Unresolved(y) => x == y,
                    named => named.full_name() == Some(x),
                }
            }
            (
                TypeData::Record {
                    name: n1,
                    fields: f1,
                },
                TypeData::Record {
                    name: n2,
                    fields: f2,
                },
            ) => {
                if n1 != n2 || f1.len() != f2.len() {
                    return false;
                }
                if !assumed.insert((a, b)) {
                    return true;
                }
                f1.iter()
                    .zip(f2)
                    .all(|(x, y)| x.name == y.name && self.eq_inner(x.ty, y.ty, assumed))
            }
            (
                TypeData::Enum {
                    name: n1,
                    symbols: s1,
                    default: d1,
                },
                TypeData::Enum {
                    name: n2,
                    symbols: s2,
                    default: d2,
                },
            ) => n1 == n2 && s1 == s2 && d1 == d2,
            (TypeData::Fixed { name: n1, size: s1 }, TypeData::Fixed { name: n2, size: s2 }) => {
                n1 == n2 && s1 == s2
            }
            (TypeData::Array(x), TypeData::Array(y)) | (TypeData::Map(x), TypeData::Map(y)) => {
                self.eq_inner(*x, *y, assumed)
            }
            (TypeData::Union(x), TypeData::Union(y)) => {
                x.len() == y.len()
                    && x.iter()
                        .zip(y.iter())
                        .all(|(p, q)| self.eq_inner(*p, *q, assumed))
            }
            _ => false,
        })
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}
