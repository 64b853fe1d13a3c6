//! Maps backend call outcomes onto the domain error taxonomy.
//!
//! 404 becomes `NotFound` and 422 becomes `InvalidInput`, both carrying the
//! backend's own message. Every other failure is logged with its full status
//! and body and re-raised as `Upstream`.

use catalog_core::error::DomainError;
use catalog_core::http_error::HttpErrorInfo;
use reqwest::StatusCode;
use tracing::warn;

/// Translates a non-success backend response.
///
/// The message comes from the structured error body; if the body is not a
/// valid `HttpErrorInfo`, the raw response text is used instead.
#[must_use]
pub fn translate_error_response(status: StatusCode, body: &str) -> DomainError {
    let message = HttpErrorInfo::parse(body).map_or_else(|| raw_message(status, body), |info| info.message);

    match status {
        StatusCode::NOT_FOUND => DomainError::NotFound(message),
        StatusCode::UNPROCESSABLE_ENTITY => DomainError::InvalidInput(message),
        _ => {
            warn!(status = status.as_u16(), body, "unexpected backend status");
            DomainError::Upstream {
                status: Some(status.as_u16()),
                message,
            }
        }
    }
}

/// Translates a failure that produced no usable response (connection
/// refused, timeout, undecodable success body).
#[must_use]
pub fn translate_transport_error(err: &reqwest::Error) -> DomainError {
    warn!(error = %err, "backend call failed");
    DomainError::Upstream {
        status: err.status().map(|s| s.as_u16()),
        message: err.to_string(),
    }
}

fn raw_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {body}")
    }
}
