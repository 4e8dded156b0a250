//! Request error taxonomy.
//!
//! Every failure a handler can report maps to one variant here, and
//! every variant renders as `{"detail": "..."}` with a fixed status
//! code. Authorization and validation errors are produced before any
//! outbound call is attempted; `Upstream` is the single transport
//! failure mode of the forwarding step and is never retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to the webhook caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Path token did not match the configured secret
    #[error("invalid webhook token")]
    InvalidToken,

    /// Request body was not valid JSON
    #[error("request body is not valid JSON")]
    InvalidJson,

    /// JSON parsed but did not satisfy the message shape
    #[error("payload failed validation")]
    InvalidPayload,

    /// The Bot API call failed at the transport level
    #[error("telegram request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl ApiError {
    /// HTTP status code this error renders as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidToken => StatusCode::FORBIDDEN,
            ApiError::InvalidJson => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidPayload => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Caller-facing detail string. Upstream internals are not leaked.
    pub fn detail(&self) -> &'static str {
        match self {
            ApiError::InvalidToken => "Invalid token",
            ApiError::InvalidJson => "Invalid JSON",
            ApiError::InvalidPayload => "Invalid payload",
            ApiError::Upstream(_) => "Upstream request failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::InvalidToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::InvalidJson.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::InvalidPayload.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_details_are_fixed_strings() {
        assert_eq!(ApiError::InvalidToken.detail(), "Invalid token");
        assert_eq!(ApiError::InvalidJson.detail(), "Invalid JSON");
        assert_eq!(ApiError::InvalidPayload.detail(), "Invalid payload");
    }
}
