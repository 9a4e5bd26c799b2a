//! API error types with IntoResponse
//!
//! Errors are converted to `{"error": ...}` bodies with the mapped status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Advertisement not found (404)
    NotFound,

    /// Title already taken (409)
    Conflict,

    /// Body is not `application/json` (415)
    UnsupportedMediaType,

    /// Store unavailable or failed unexpectedly (500, logged)
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, json!({ "error": e })),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "advertisement not found" }),
            ),
            Self::Conflict => (
                StatusCode::CONFLICT,
                json!({ "error": "advertisement already exists" }),
            ),
            Self::UnsupportedMediaType => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                json!({ "error": "expected Content-Type: application/json" }),
            ),
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => Self::NotFound,
            StoreError::DuplicateKey => Self::Conflict,
            _ => Self::Store(e),
        }
    }
}
