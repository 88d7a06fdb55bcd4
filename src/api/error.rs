use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::core::LoadboardError;

use super::types::ErrorResponse;

/// API-specific errors with HTTP status code mapping.
#[derive(Debug)]
pub enum ApiError {
    LoadNotFound(String),
    InvalidRequest(String),
    Internal(String),
}

impl From<LoadboardError> for ApiError {
    fn from(err: LoadboardError) -> Self {
        match err {
            err @ LoadboardError::LoadNotFound(_) => ApiError::LoadNotFound(err.to_string()),
            LoadboardError::InvalidInput(msg) => ApiError::InvalidRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::LoadNotFound(msg) => (StatusCode::NOT_FOUND, "LOAD_NOT_FOUND", msg),
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
