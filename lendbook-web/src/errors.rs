//! Web-specific error types and conversions
//!
//! Every error leaves the process as `{ "error": { "code", "message" } }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lendbook_http::GatewayError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::session::SessionError;

/// Message sent instead of the details of an internal error
const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Web-specific error type for the HTTP surface
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;

impl WebError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            WebError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            WebError::Forbidden { .. } => StatusCode::FORBIDDEN,
            WebError::NotFound { .. } => StatusCode::NOT_FOUND,
            WebError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            WebError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            WebError::BadRequest { .. } => "BAD_REQUEST",
            WebError::Unauthorized { .. } => "UNAUTHORIZED",
            WebError::Forbidden { .. } => "FORBIDDEN",
            WebError::NotFound { .. } => "NOT_FOUND",
            WebError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            WebError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to the caller
    pub fn public_message(&self) -> &str {
        match self {
            WebError::BadRequest { message }
            | WebError::Unauthorized { message }
            | WebError::Forbidden { message }
            | WebError::NotFound { message }
            | WebError::ServiceUnavailable { message } => message,
            WebError::Internal { .. } => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if let WebError::Internal { ref message } = self {
            error!("Internal error: {}", message);
        }

        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.public_message()
            }
        });

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<GatewayError> for WebError {
    fn from(error: GatewayError) -> Self {
        let message = error.user_message();
        match error {
            GatewayError::Rejected { .. } => WebError::Unauthorized { message },
            GatewayError::Unavailable(_) => WebError::ServiceUnavailable { message },
            GatewayError::InvalidResponse(detail) => {
                warn!("Unexpected credential service response: {}", detail);
                WebError::ServiceUnavailable { message }
            }
            GatewayError::ConfigError(detail) => WebError::Internal { message: detail },
        }
    }
}

impl From<SessionError> for WebError {
    fn from(error: SessionError) -> Self {
        WebError::internal(error.to_string())
    }
}

// Common error constructors
impl WebError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        WebError::BadRequest {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        WebError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        WebError::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        WebError::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        WebError::Internal {
            message: message.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        WebError::ServiceUnavailable {
            message: message.into(),
        }
    }
}
