//! API error responses
//!
//! Every failure is returned as `{"error": "<message>"}` with a status
//! matching its kind.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Errors surfaced by the HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// Unknown domain or resource
    NotFound(String),
    /// Missing or invalid request data
    BadRequest(String),
    /// Persisting overrides failed
    Storage(String),
}

impl From<mmd_common::Error> for ApiError {
    fn from(err: mmd_common::Error) -> Self {
        match err {
            mmd_common::Error::NotFound(msg) => ApiError::NotFound(msg),
            mmd_common::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Storage(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Storage(msg) => {
                error!("Failed to persist overrides: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to persist overrides: {}", msg),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
