//! Error types for ID generation and prefixed lookups.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = PrefixedIdError> = std::result::Result<T, E>;

/// Errors surfaced by the registry, the resolver and the model helpers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrefixedIdError {
    /// An ID was requested for a model type that has no registered prefix.
    #[error("no prefix configured for model '{model}'")]
    NoPrefixConfiguredForModel { model: String },

    /// No registered prefix matches the ID, or no record exists under it.
    #[error("no prefixed model found for id '{prefixed_id}'")]
    NoPrefixedModelFound { prefixed_id: String },

    /// The underlying store failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl PrefixedIdError {
    pub(crate) fn not_configured(model: &str) -> Self {
        PrefixedIdError::NoPrefixConfiguredForModel {
            model: model.to_string(),
        }
    }

    pub(crate) fn not_found(prefixed_id: &str) -> Self {
        PrefixedIdError::NoPrefixedModelFound {
            prefixed_id: prefixed_id.to_string(),
        }
    }

    /// Returns true if this error indicates a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PrefixedIdError::NoPrefixedModelFound { .. })
    }

    /// Returns true if this error indicates an unregistered model type.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, PrefixedIdError::NoPrefixConfiguredForModel { .. })
    }
}

/// Errors reported by a [`ModelStore`](crate::ModelStore) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with the same prefixed ID already exists.
    #[error("a record with prefixed id '{prefixed_id}' already exists")]
    Conflict { prefixed_id: String },

    /// The backing storage engine failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}
