//! API error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API errors that can be returned to clients.
///
/// Upstream trouble is normally answered with synthetic data or passed
/// through verbatim; only malformed input and unrepresentable upstream
/// statuses end up here.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// No such route.
    #[error("not found: {0}")]
    NotFound(String),

    /// Resource path with dot segments that would leave `/gq-core/`.
    #[error("invalid resource path: {0}")]
    InvalidPath(String),

    /// The upstream answered with a status HTTP cannot represent.
    #[error("upstream returned invalid status {0}")]
    UpstreamStatus(u16),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone())),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            ApiError::InvalidPath(path) => {
                tracing::warn!("Rejected resource path: {}", path);
                (StatusCode::BAD_REQUEST, "invalid_path", Some(path.clone()))
            }
            ApiError::UpstreamStatus(status) => {
                tracing::error!("Upstream returned invalid status {}", status);
                (StatusCode::BAD_GATEWAY, "bad_upstream_status", Some(status.to_string()))
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
