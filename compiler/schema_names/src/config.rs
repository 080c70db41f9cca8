//! Registry configuration.

use crate::ValidatorKind;

/// Construction-time settings for a [`TypeRegistry`](crate::TypeRegistry).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegistryConfig {
    /// Namespace used to expand bare names when a view has none of its own.
    /// An empty string means the root (null) namespace.
    pub namespace: Option<String>,
    /// Built-in name validation policy.
    pub validator: ValidatorKind,
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: ValidatorKind) -> Self {
        self.validator = validator;
        self
    }

    /// The configured namespace, with empty normalized to `None`.
    pub fn effective_namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }
}
