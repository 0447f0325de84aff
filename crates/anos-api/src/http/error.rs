//! Application error type mapping relay failures to HTTP status codes and
//! the `{"error": "..."}` body the chat client expects.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use anos_core::relay::service::MESSAGE_REQUIRED;
use anos_types::chat::ErrorBody;
use anos_types::error::RelayError;

pub const INVALID_API_KEY: &str = "Invalid API key. Please check your Gemini API configuration.";
pub const QUOTA_EXCEEDED: &str = "API quota exceeded. Please try again later.";
pub const INTERNAL_ERROR: &str = "Internal server error. Please try again.";

/// Application-level error that maps to HTTP responses.
///
/// Upstream detail never reaches the client; it is logged by the relay.
#[derive(Debug)]
pub enum AppError {
    Relay(RelayError),
    /// Request body could not be read as a chat request.
    BadRequest(String),
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError::Relay(e)
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::BadRequest(_) | AppError::Relay(RelayError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, MESSAGE_REQUIRED)
            }
            AppError::Relay(RelayError::UpstreamAuth(_)) => {
                (StatusCode::UNAUTHORIZED, INVALID_API_KEY)
            }
            AppError::Relay(RelayError::UpstreamQuota(_)) => {
                (StatusCode::TOO_MANY_REQUESTS, QUOTA_EXCEEDED)
            }
            AppError::Relay(RelayError::Upstream(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::BadRequest(detail) = &self {
            tracing::debug!(detail = %detail, "Rejected unparseable chat request");
        }
        let (status, message) = self.status_and_message();
        (
            status,
            Json(ErrorBody {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
