//! Gateway error types

/// Error type for credential gateway calls
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The credential service answered with a non-success status
    #[error("Credentials rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Timeouts, refused connections and other transport failures
    #[error("Credential service unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid credential service response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl GatewayError {
    /// Message suitable for the sign-in form
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Rejected { message, .. } => message.clone(),
            GatewayError::Unavailable(_) => "The sign-in service is unavailable, try again later".to_string(),
            GatewayError::InvalidResponse(_) | GatewayError::ConfigError(_) => {
                "Sign-in failed".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::InvalidResponse(err.to_string())
        } else if err.is_builder() {
            GatewayError::ConfigError(err.to_string())
        } else {
            GatewayError::Unavailable(err.to_string())
        }
    }
}

impl From<jsonwebtoken::errors::Error> for GatewayError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        GatewayError::InvalidResponse(format!("unreadable token: {}", err))
    }
}
