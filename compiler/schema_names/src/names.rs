//! Pure name expansion and projection.
//!
//! Neither function touches a registry; [`TypeRegistry`](crate::TypeRegistry)
//! wraps both with its own namespace.

use schema_types::{is_primitive_name, FullName};

/// Expand a local or full name against a namespace.
///
/// - Primitive keywords are returned unchanged.
/// - Names containing a dot are already fully qualified and are never
///   expanded.
/// - Bare local names are prefixed with `namespace` when it is non-empty.
pub fn expand_name(name: &str, namespace: Option<&str>) -> FullName {
    if is_primitive_name(name) || name.contains('.') {
        return FullName::new(name);
    }
    FullName::qualified(namespace, name)
}

/// The simplest name that refers to `full_name` from within `namespace`.
///
/// Strips the namespace only when it equals `namespace` and the remaining
/// local part cannot be mistaken for a primitive keyword.
pub fn simple_name<'a>(full_name: &'a str, namespace: Option<&str>) -> &'a str {
    match full_name.rsplit_once('.') {
        Some((space, local)) if !is_primitive_name(local) && Some(space) == namespace => local,
        _ => full_name,
    }
}
