/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Unified error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Failure taxonomy for everything that crosses the transport boundary.
///
/// Upstream and store failures are re-classified into one of these variants
/// before they reach a handler; no raw upstream detail leaves the process
/// beyond a logged message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The queried resource does not exist (store miss or upstream 404).
    #[error("resource not found")]
    NotFound { resource: String },

    /// Any other upstream failure: timeout, malformed body, 5xx.
    #[error("failed to fetch {resource}")]
    Upstream { resource: String, detail: String },

    /// Export request could not be satisfied.
    #[error("export failed: {0}")]
    Export(String),

    /// Backing store failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn upstream(resource: impl Into<String>, detail: impl ToString) -> Self {
        ApiError::Upstream {
            resource: resource.into(),
            detail: detail.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Upstream { resource, detail } => {
                tracing::error!("upstream failure for {}: {}", resource, detail);
                (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE")
            }
            ApiError::Export(_) => (StatusCode::BAD_REQUEST, "EXPORT_ERROR"),
            ApiError::Database(e) => {
                tracing::error!("database failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR")
            }
        };

        let body = ErrorResponse {
            ok: false,
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404_with_fixed_message() {
        assert_eq!(ApiError::not_found("pokemon").to_string(), "resource not found");
        let resp = ApiError::not_found("pokemon").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn upstream_maps_to_502_and_names_the_resource() {
        let err = ApiError::upstream("pokemon list", "connect timeout");
        assert_eq!(err.to_string(), "failed to fetch pokemon list");
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn not_found_and_upstream_are_distinguishable() {
        assert!(matches!(ApiError::not_found("pokemon"), ApiError::NotFound { .. }));
        assert!(matches!(
            ApiError::upstream("pokemon", "timeout"),
            ApiError::Upstream { .. }
        ));
    }

    #[test]
    fn export_error_maps_to_400() {
        let resp = ApiError::Export("unsupported export format: pdf".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
