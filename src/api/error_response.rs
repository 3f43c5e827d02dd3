//! Unified error response handling for the API
//!
//! Every failure leaving a handler is rendered as the same JSON shape.
//! Server-side faults are logged with their detail and reported to the
//! client as an opaque internal error.

use crate::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Standard error response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Unique error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::Authentication(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Error::Config(_)
            | Error::Database(_)
            | Error::Migration(_)
            | Error::Serialization(_)
            | Error::Io(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        match self {
            Error::Validation { field, message } => {
                ErrorResponse::new("VALIDATION_FAILED", message.clone())
                    .with_details(serde_json::json!({ "field": field }))
            }
            Error::Authentication(message) => ErrorResponse::new("UNAUTHORIZED", message.clone()),
            Error::Forbidden(message) => ErrorResponse::new("FORBIDDEN", message.clone()),
            Error::NotFound { .. } => ErrorResponse::new("NOT_FOUND", self.to_string()),
            Error::Conflict(message) => ErrorResponse::new("CONFLICT", message.clone()),
            Error::RateLimited => ErrorResponse::new(
                "RATE_LIMITED",
                "You have exceeded the rate limit. Please try again later.",
            ),
            // Internal detail goes to the log, not to the client
            _ => ErrorResponse::new("INTERNAL_ERROR", "Internal server error"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        } else {
            warn!(error = %self, status = %status, "request rejected");
        }
        self.to_error_response().into_response_with_status(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_creation() {
        let error = ErrorResponse::new("TEST_ERROR", "Test error message");
        assert_eq!(error.code, "TEST_ERROR");
        assert_eq!(error.message, "Test error message");
        assert!(error.details.is_none());
    }

    #[test]
    fn test_validation_error_maps_to_400_with_field_detail() {
        let error = Error::validation("mood", "Invalid mood value");
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        let body = error.to_error_response();
        assert_eq!(body.code, "VALIDATION_FAILED");
        assert_eq!(body.details.unwrap()["field"], "mood");
    }

    #[test]
    fn test_internal_errors_do_not_leak_detail() {
        let error = Error::internal("pool exhausted on shard 3");
        let body = error.to_error_response();
        assert_eq!(body.code, "INTERNAL_ERROR");
        assert!(!body.message.contains("shard"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            Error::authentication("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            Error::forbidden("bad token").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            Error::not_found("Work log").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::conflict("duplicate").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            Error::RateLimited.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
