//! Credential gateway contract

use lendbook_rbac::Identity;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::GatewayError;

/// Sign-in form payload
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub document: String,
    pub password: String,
}

impl Credentials {
    pub fn new(document: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("document", &self.document)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct GatewaySession {
    pub identity: Identity,

    /// Token issued by the remote credential service, when there is one
    pub upstream_token: Option<String>,
}

/// Verifies credentials and returns the identity they belong to
#[async_trait::async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<GatewaySession, GatewayError>;

    /// Short provider name for logs
    fn name(&self) -> &'static str;
}
