//! Structured error body exchanged between services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON body every service returns for a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpErrorInfo {
    /// Request path that failed.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
    /// HTTP status code.
    pub status: u16,
}

impl HttpErrorInfo {
    /// Parses a response body, returning `None` if it is not a structured
    /// error.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}
