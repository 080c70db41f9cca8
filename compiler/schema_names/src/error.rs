//! Registration and linking errors.
//!
//! All errors are terminal for the current session: the caller rolls the
//! registry back and reports them. Each variant names the offending full
//! name so it can be shown to the schema author.

use std::fmt;

use schema_diagnostic::{Diagnostic, ErrorCode};
use schema_types::{FullName, Tag};

use crate::Violation;

/// Which part of a full name a validation error refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NamePart {
    /// One of the dot-separated namespace segments.
    Namespace,
    /// The final, local segment.
    Name,
}

impl fmt::Display for NamePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamePart::Namespace => write!(f, "namespace part"),
            NamePart::Name => write!(f, "name"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A segment of the name failed the registry's name validator.
    #[error("{part} \"{segment}\" of `{full_name}` is invalid: {}", join(.violations))]
    NameValidation {
        full_name: FullName,
        part: NamePart,
        segment: String,
        violations: Vec<Violation>,
    },

    /// The name is already bound to a structurally different type.
    #[error("can't redefine: {full_name}")]
    Redefinition { full_name: FullName },

    /// Only record, enum and fixed types may be registered.
    #[error("only named types can be registered, found {kind}")]
    InvalidRegistration { kind: Tag },

    /// A placeholder survived the fixup pass.
    #[error("undefined name: {full_name}")]
    UnresolvedReference { full_name: FullName },
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl RegistryError {
    /// The full name the error is about, if it has one.
    pub fn full_name(&self) -> Option<&FullName> {
        match self {
            RegistryError::NameValidation { full_name, .. }
            | RegistryError::Redefinition { full_name }
            | RegistryError::UnresolvedReference { full_name } => Some(full_name),
            RegistryError::InvalidRegistration { .. } => None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            RegistryError::NameValidation { .. } => ErrorCode::E1001,
            RegistryError::Redefinition { .. } => ErrorCode::E1002,
            RegistryError::InvalidRegistration { .. } => ErrorCode::E1003,
            RegistryError::UnresolvedReference { .. } => ErrorCode::E2001,
        }
    }

    /// Convert to a diagnostic with helpful suggestions.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            RegistryError::NameValidation {
                full_name,
                part,
                segment,
                violations,
            } => {
                let diag = violations
                    .iter()
                    .fold(diag.with_subject(full_name.as_str()), |d, v| {
                        d.with_note(format!("in `{segment}`: {v}"))
                    });
                diag.with_suggestion(format!(
                    "change the {part} `{segment}` so it satisfies the registry's name validator"
                ))
            }
            RegistryError::Redefinition { full_name } => diag
                .with_subject(full_name.as_str())
                .with_note("a different type is already registered under this name")
                .with_suggestion("rename one of the declarations, or make them identical"),
            RegistryError::InvalidRegistration { kind } => diag
                .with_note(format!("{kind} types are anonymous and are referenced structurally"))
                .with_suggestion("only register record, enum and fixed types"),
            RegistryError::UnresolvedReference { full_name } => diag
                .with_subject(full_name.as_str())
                .with_suggestion(format!(
                    "declare `{full_name}`, or check the spelling and namespace of the reference"
                )),
        }
    }
}
