//! Diagnostic system for schema name resolution errors.
//!
//! Every user-facing failure is rendered as a [`Diagnostic`]:
//! - Error codes for searchability
//! - Clear messages (what went wrong)
//! - Subject (which name it went wrong on)
//! - Notes (why it's wrong)
//! - Suggestions (how to fix)
//!
//! Schema registration has no source text of its own, so diagnostics point
//! at names rather than spans. The grammar layer that owns the text can map
//! a subject name back to a location.

mod diagnostic;
mod error_code;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
