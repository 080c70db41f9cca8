//! Pluggable name validation.
//!
//! Every dot-separated segment of a registered full name is checked by the
//! registry's [`NameValidator`]. Three policies are built in:
//!
//! | policy | first character | remaining characters |
//! |--------|-----------------|----------------------|
//! | [`UtfValidator`] | Unicode letter or `_` | Unicode letters, digits, `_` |
//! | [`StrictValidator`] | ASCII letter or `_` | ASCII letters, digits, `_` |
//! | [`NoValidation`] | anything | anything |

use std::fmt;
use std::sync::Arc;

/// A single reason a name segment was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Violation {
    /// The segment is empty (e.g. `a..b` or a trailing dot).
    Empty,
    /// The first character may not start a name.
    IllegalInitial { ch: char },
    /// A later character is not allowed; `position` counts characters.
    IllegalChar { ch: char, position: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Empty => write!(f, "empty name"),
            Violation::IllegalInitial { ch } => write!(f, "illegal initial character {ch:?}"),
            Violation::IllegalChar { ch, position } => {
                write!(f, "illegal character {ch:?} at position {position}")
            }
        }
    }
}

/// Policy deciding which name segments are acceptable.
pub trait NameValidator: Send + Sync + fmt::Debug {
    /// Validate one segment. On failure, report every violation found.
    fn validate(&self, segment: &str) -> Result<(), Vec<Violation>>;
}

/// Choice of built-in validator, for configuration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ValidatorKind {
    #[default]
    Utf,
    Strict,
    NoValidation,
}

impl ValidatorKind {
    pub fn validator(self) -> Arc<dyn NameValidator> {
        match self {
            ValidatorKind::Utf => Arc::new(UtfValidator),
            ValidatorKind::Strict => Arc::new(StrictValidator),
            ValidatorKind::NoValidation => Arc::new(NoValidation),
        }
    }
}

/// Accepts Unicode identifiers.
#[derive(Copy, Clone, Debug, Default)]
pub struct UtfValidator;

/// Accepts ASCII identifiers only.
#[derive(Copy, Clone, Debug, Default)]
pub struct StrictValidator;

/// Accepts everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoValidation;

impl NameValidator for UtfValidator {
    fn validate(&self, segment: &str) -> Result<(), Vec<Violation>> {
        check_chars(
            segment,
            |c| c.is_alphabetic() || c == '_',
            |c| c.is_alphanumeric() || c == '_',
        )
    }
}

impl NameValidator for StrictValidator {
    fn validate(&self, segment: &str) -> Result<(), Vec<Violation>> {
        check_chars(
            segment,
            |c| c.is_ascii_alphabetic() || c == '_',
            |c| c.is_ascii_alphanumeric() || c == '_',
        )
    }
}

impl NameValidator for NoValidation {
    fn validate(&self, _segment: &str) -> Result<(), Vec<Violation>> {
        Ok(())
    }
}

fn check_chars(
    segment: &str,
    initial: impl Fn(char) -> bool,
    rest: impl Fn(char) -> bool,
) -> Result<(), Vec<Violation>> {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return Err(vec![Violation::Empty]);
    };

    let mut violations = Vec::new();
    if !initial(first) {
        violations.push(Violation::IllegalInitial { ch: first });
    }
    for (i, ch) in chars.enumerate() {
        if !rest(ch) {
            violations.push(Violation::IllegalChar {
                ch,
                position: i + 1,
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
