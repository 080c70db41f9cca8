//! Error codes for all name resolution diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the phase that produced it.

use std::fmt;

/// Error codes for all name resolution diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Registration errors (raised by `put`)
/// - E2xxx: Reference errors (raised by the fixup pass)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Registration Errors (E1xxx)
    /// Name segment rejected by the name validator
    E1001,
    /// Name already bound to a different type
    E1002,
    /// Only named types may be registered
    E1003,

    // Reference Errors (E2xxx)
    /// Reference to a name that was never declared
    E2001,
}

impl ErrorCode {
    /// All error codes, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E2001,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
        }
    }

    /// Short human-readable title, used by `--explain` style lookups.
    pub fn title(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "invalid name",
            ErrorCode::E1002 => "redefinition of a named type",
            ErrorCode::E1003 => "registration of an unnamed type",
            ErrorCode::E2001 => "unresolved type reference",
        }
    }

    /// Check if this code is raised while registering types.
    pub fn is_registration_error(&self) -> bool {
        matches!(self, ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003)
    }

    /// Check if this code is raised while linking references.
    pub fn is_reference_error(&self) -> bool {
        matches!(self, ErrorCode::E2001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E1002"`.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or(())
    }
}
