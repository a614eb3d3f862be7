//! Application error type mapping to the wire contract's status codes.
//!
//! Only two shapes leave the server: 400 with the fixed missing-fields
//! message, and 500 with a generic message. Internal detail is logged via
//! tracing and never included in the response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use askcampus_types::error::ChatError;

/// Fixed body text for validation failures.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: sessionId and message";

/// Generic body text for internal failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Missing session identifier or message.
    BadRequest,
    /// Any failure in history parsing, inference, or persistence.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        if e.is_bad_request() {
            AppError::BadRequest
        } else {
            AppError::Internal(e.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest => (StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE),
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "chat request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
