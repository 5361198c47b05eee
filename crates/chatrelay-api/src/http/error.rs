//! Application error type mapping to HTTP status codes and the failure body.
//!
//! This is the single place where typed errors become transport responses:
//! client mistakes are 400 without a timestamp, everything else is 500 with one.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use chatrelay_types::error::ChatError;

use crate::http::response::FailureResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Chat orchestration errors.
    Chat(ChatError),
    /// Malformed request (bad JSON, missing query parameter).
    Validation(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Chat(ChatError::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Chat(ChatError::Upstream(cause)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("request failed: {cause}"),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let timestamp = if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %message, "Request failed");
            Some(chrono::Utc::now().to_rfc3339())
        } else {
            tracing::debug!(status = status.as_u16(), %message, "Rejected request");
            None
        };

        let body = FailureResponse {
            success: false,
            message,
            timestamp,
        };

        (status, Json(body)).into_response()
    }
}
