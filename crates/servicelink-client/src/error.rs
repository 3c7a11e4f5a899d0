//! Client error types.

use servicelink_models::ApiResponse;
use thiserror::Error;

/// Result type for facade operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Message used when a non-2xx response carries no `message`.
pub const GENERIC_FAILURE: &str = "An error occurred";

/// Message used when an error has no text at all.
pub const UNKNOWN_FAILURE: &str = "An unknown error occurred";

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status for errors produced by a response.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text shown to callers, or `fallback` when the error has none.
    ///
    /// Status errors yield the server's message verbatim; validation
    /// errors yield their own text.
    pub fn message_or(&self, fallback: &str) -> String {
        let text = match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        };

        if text.trim().is_empty() {
            fallback.to_string()
        } else {
            text
        }
    }

    /// Text used in normalized failure envelopes.
    pub fn user_message(&self) -> String {
        self.message_or(UNKNOWN_FAILURE)
    }

    /// Normalized failure: `{ success: false, message, data: null }`.
    pub fn into_response(self) -> ApiResponse {
        ApiResponse::failure(self.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_is_server_text() {
        let err = ApiError::Status {
            status: 404,
            message: "Booking not found".into(),
        };
        assert_eq!(err.user_message(), "Booking not found");
        assert_eq!(err.http_status(), Some(404));
        assert_eq!(err.to_string(), "Booking not found (HTTP 404)");
    }

    #[test]
    fn test_empty_message_falls_back() {
        let err = ApiError::validation("  ");
        assert_eq!(err.user_message(), UNKNOWN_FAILURE);
        assert_eq!(err.message_or("Failed to send message"), "Failed to send message");
    }

    #[test]
    fn test_validation_into_response() {
        let response = ApiError::validation("Authentication required").into_response();
        assert!(!response.is_success());
        assert_eq!(response.message(), Some("Authentication required"));
        assert!(response.data().is_none());
        assert_eq!(
            response.into_value(),
            serde_json::json!({ "success": false, "message": "Authentication required", "data": null })
        );
    }

    #[test]
    fn test_json_error_has_text() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(err.user_message().starts_with("JSON error"));
        assert_eq!(err.http_status(), None);
    }
}
