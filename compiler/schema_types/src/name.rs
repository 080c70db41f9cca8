//! Dot-qualified type names.

use std::borrow::Borrow;
use std::fmt;

/// A canonical, dot-qualified type name: `namespace.local` or bare `local`.
///
/// Case-sensitive and compared as an opaque string. The last dot separates
/// the namespace from the local part; any earlier dots belong to the
/// namespace.
#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FullName(Box<str>);

impl FullName {
    /// Wrap an already-qualified name.
    pub fn new(name: impl Into<Box<str>>) -> Self {
        FullName(name.into())
    }

    /// Join a namespace and a local name. An empty or absent namespace
    /// yields the bare local name.
    pub fn qualified(namespace: Option<&str>, local: &str) -> Self {
        match namespace {
            Some(ns) if !ns.is_empty() => FullName(format!("{ns}.{local}").into_boxed_str()),
            _ => FullName(local.into()),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split at the last dot into `(namespace, local)`.
    pub fn split(&self) -> (Option<&str>, &str) {
        match self.0.rsplit_once('.') {
            Some((space, local)) => (Some(space), local),
            None => (None, &self.0),
        }
    }

    /// The namespace part, if the name is qualified.
    pub fn namespace(&self) -> Option<&str> {
        self.split().0
    }

    /// The local part (everything after the last dot).
    pub fn local(&self) -> &str {
        self.split().1
    }

    /// Check whether the name carries a namespace.
    pub fn is_qualified(&self) -> bool {
        self.0.contains('.')
    }

    /// The dot-separated segments, namespace parts first.
    pub fn segments(&self) -> std::str::Split<'_, char> {
        self.0.split('.')
    }
}

impl Borrow<str> for FullName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FullName {
    fn from(name: &str) -> Self {
        FullName::new(name)
    }
}

impl From<String> for FullName {
    fn from(name: String) -> Self {
        FullName::new(name)
    }
}

impl PartialEq<str> for FullName {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for FullName {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_joins_with_dot() {
        assert_eq!(FullName::qualified(Some("com.example"), "Foo"), "com.example.Foo");
        assert_eq!(FullName::qualified(Some(""), "Foo"), "Foo");
        assert_eq!(FullName::qualified(None, "Foo"), "Foo");
    }

    #[test]
    fn split_at_last_dot() {
        let name = FullName::new("com.example.Foo");
        assert_eq!(name.split(), (Some("com.example"), "Foo"));
        assert_eq!(name.namespace(), Some("com.example"));
        assert_eq!(name.local(), "Foo");
        assert!(name.is_qualified());

        let bare = FullName::new("Foo");
        assert_eq!(bare.split(), (None, "Foo"));
        assert!(!bare.is_qualified());
    }

    #[test]
    fn segments_in_order() {
        let name = FullName::new("a.b.C");
        assert_eq!(name.segments().collect::<Vec<_>>(), vec!["a", "b", "C"]);
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_ne!(FullName::new("a.Foo"), FullName::new("a.foo"));
    }
}
