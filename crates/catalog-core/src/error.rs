//! Domain error types shared by the read and write paths.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The requested entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Validation failure or uniqueness conflict.
    #[error("{0}")]
    InvalidInput(String),

    /// The event transport refused a publish.
    #[error("event dispatch to channel '{channel}' failed: {message}")]
    Dispatch {
        /// Channel the event was addressed to.
        channel: String,
        /// Transport-provided reason.
        message: String,
    },

    /// A consumer received an event it cannot process.
    #[error("{0}")]
    EventProcessing(String),

    /// Any other backend failure, carried through unchanged.
    #[error("upstream error{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Upstream {
        /// HTTP status reported by the backend, if a response was received.
        status: Option<u16>,
        /// Raw response body or transport error text.
        message: String,
    },

    /// A storage or other infrastructure failure local to a service.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Returns `true` for errors that will not go away on redelivery.
    ///
    /// Transports use this to decide between retrying a message and
    /// dead-lettering it straight away.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::InvalidInput(_) | Self::EventProcessing(_)
        )
    }
}
