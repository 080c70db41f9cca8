//! Type formatting for debugging and error messages.

#![allow(clippy::format_push_string)] // Debug formatting prioritizes clarity over allocation

use rustc_hash::FxHashSet;

use crate::stack::ensure_sufficient_stack;
use crate::{FullName, Idx, Pool, TypeData};

impl Pool {
    /// Format a type as a human-readable string, printing full names.
    pub fn format_type(&self, idx: Idx) -> String {
        self.format_type_with(idx, &|name: &FullName| name.to_string())
    }

    /// Format a type, rendering every named type through `name_of`.
    ///
    /// A named type is expanded the first time it is reached and printed by
    /// name afterwards, so recursive types render finitely.
    pub fn format_type_with(&self, idx: Idx, name_of: &dyn Fn(&FullName) -> String) -> String {
        let mut buf = String::new();
        let mut expanded = FxHashSet::default();
        self.format_into(idx, name_of, &mut expanded, &mut buf);
        buf
    }

    fn format_into(
        &self,
        idx: Idx,
        name_of: &dyn Fn(&FullName) -> String,
        expanded: &mut FxHashSet<Idx>,
        buf: &mut String,
    ) {
        let data = self.get(idx);
        if let Some(name) = data.full_name() {
            if !expanded.insert(idx) {
                buf.push_str(&name_of(name));
                return;
            }
        }

        ensure_sufficient_stack(|| match data {
            TypeData::Primitive(p) => buf.push_str(p.name()),
            TypeData::Record { name, fields } => {
                buf.push_str(&format!("record {} {{", name_of(name)));
                for (i, field) in fields.iter().enumerate() {
                    buf.push_str(if i == 0 { " " } else { ", " });
                    buf.push_str(&field.name);
                    buf.push_str(": ");
                    self.format_into(field.ty, name_of, expanded, buf);
                }
                buf.push_str(if fields.is_empty() { "}" } else { " }" });
            }
            TypeData::Enum {
                name,
                symbols,
                default,
            } => {
                buf.push_str(&format!("enum {} {{ {} }}", name_of(name), symbols.join(", ")));
                if let Some(default) = default {
                    buf.push_str(&format!(" = {default}"));
                }
            }
            TypeData::Fixed { name, size } => {
                buf.push_str(&format!("fixed {}({size})", name_of(name)));
            }
            TypeData::Array(items) => {
                buf.push_str("array<");
                self.format_into(*items, name_of, expanded, buf);
                buf.push('>');
            }
            TypeData::Map(values) => {
                buf.push_str("map<");
                self.format_into(*values, name_of, expanded, buf);
                buf.push('>');
            }
            TypeData::Union(branches) => {
                buf.push_str("union[");
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.format_into(*branch, name_of, expanded, buf);
                }
                buf.push(']');
            }
            TypeData::Unresolved(name) => {
                buf.push('?');
                buf.push_str(&name_of(name));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Field;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_primitives_and_containers() {
        let mut pool = Pool::new();
        let arr = pool.array(Idx::STRING);
        let map = pool.map(arr);
        let uni = pool.union([Idx::NULL, map]);
        assert_eq!(pool.format_type(Idx::INT), "int");
        assert_eq!(pool.format_type(uni), "union[null, map<array<string>>]");
    }

    #[test]
    fn formats_named_types_once() {
        let mut pool = Pool::new();
        let md5 = pool.fixed("com.example.Md5", 16);
        let suit = pool.enumeration("Suit", vec!["HEARTS".into(), "SPADES".into()], Some("HEARTS".into()));
        let rec = pool.record(
            "com.example.Pair",
            vec![Field::new("a", md5), Field::new("b", md5), Field::new("s", suit)],
        );
        assert_eq!(
            pool.format_type(rec),
            "record com.example.Pair { a: fixed com.example.Md5(16), b: com.example.Md5, \
             s: enum Suit { HEARTS, SPADES } = HEARTS }"
        );
    }

    #[test]
    fn formats_recursive_types_finitely() {
        let mut pool = Pool::new();
        let node = pool.record("Node", vec![]);
        let next = pool.union([Idx::NULL, node]);
        assert!(pool.set_fields(node, vec![Field::new("next", next)]));
        assert_eq!(pool.format_type(node), "record Node { next: union[null, Node] }");
    }

    #[test]
    fn formats_placeholders_and_custom_names() {
        let mut pool = Pool::new();
        let hole = pool.placeholder("com.example.Bar");
        let rec = pool.record("com.example.Foo", vec![Field::new("bar", hole)]);
        let local = |name: &FullName| name.local().to_string();
        assert_eq!(pool.format_type_with(rec, &local), "record Foo { bar: ?Bar }");
        assert_eq!(pool.format_type(hole), "?com.example.Bar");
    }
}
