//! Storage outcomes shared by every repository implementation.

use thiserror::Error;

use crate::error::DomainError;

/// Errors reported by repository implementations, whatever the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A row with the same natural key already exists.
    #[error("uniqueness conflict: {0}")]
    Conflict(String),

    /// Any other storage failure.
    #[error("storage failure: {0}")]
    Backend(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        Self::Infrastructure(err.to_string())
    }
}
