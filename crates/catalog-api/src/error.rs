//! Catalog — API error types.

use axum::Json;
use axum::extract::Request;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use catalog_core::bus::BusError;
use catalog_core::error::DomainError;
use catalog_core::http_error::HttpErrorInfo;
use chrono::Utc;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or pool error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A consumer could not be attached to the message transport.
    #[error("transport error: {0}")]
    Transport(#[from] BusError),

    /// The backend HTTP client could not be built.
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// HTTP-layer error that implements `IntoResponse`.
///
/// The body is an [`HttpErrorInfo`]. Its `path` is filled in by
/// [`error_path`], which must wrap every router returning `ApiError`.
#[derive(Debug)]
pub enum ApiError {
    /// A service operation failed.
    Domain(DomainError),
    /// The request could not be extracted; keeps the rejection's status.
    Rejected { status: StatusCode, message: String },
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Domain(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Domain(DomainError::InvalidInput(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Domain(DomainError::Dispatch { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Domain(DomainError::Upstream { status, .. }) => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Self::Domain(DomainError::EventProcessing(_) | DomainError::Infrastructure(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Rejected { status, .. } => *status,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Domain(err) => err.to_string(),
            Self::Rejected { message, .. } => message.clone(),
        }
    }
}

/// Error body awaiting its request path.
#[derive(Debug, Clone)]
struct PendingErrorInfo(HttpErrorInfo);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let info = HttpErrorInfo {
            path: String::new(),
            message: self.message(),
            timestamp: Utc::now(),
            status: status.as_u16(),
        };

        let mut response = (status, Json(info.clone())).into_response();
        response.extensions_mut().insert(PendingErrorInfo(info));
        response
    }
}

/// Middleware stamping the request path into `ApiError` bodies.
pub async fn error_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    let Some(PendingErrorInfo(mut info)) = response.extensions_mut().remove::<PendingErrorInfo>() else {
        return response;
    };
    info.path = path;
    (response.status(), Json(info)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::routing::get;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    fn status_of(err: DomainError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            status_of(DomainError::NotFound("gone".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_invalid_input_maps_to_422() {
        assert_eq!(
            status_of(DomainError::InvalidInput("bad".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_dispatch_maps_to_503() {
        assert_eq!(
            status_of(DomainError::Dispatch {
                channel: "products".into(),
                message: "transport closed".into(),
            }),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_upstream_keeps_backend_status_or_falls_back_to_502() {
        assert_eq!(
            status_of(DomainError::Upstream {
                status: Some(500),
                message: "boom".into(),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(DomainError::Upstream {
                status: None,
                message: "refused".into(),
            }),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Infrastructure("db down".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_error_body_carries_request_path() {
        // Arrange
        async fn missing() -> Result<(), ApiError> {
            Err(DomainError::NotFound("No product found for productId: 9".into()).into())
        }
        let app = Router::new()
            .route("/product/{id}", get(missing))
            .layer(axum::middleware::from_fn(error_path));
        let request = axum::http::Request::builder()
            .uri("/product/9")
            .body(Body::empty())
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let info: HttpErrorInfo = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(info.path, "/product/9");
        assert_eq!(info.status, 404);
        assert_eq!(info.message, "No product found for productId: 9");
    }
}
