//! Credential gateway configuration
//!
//! Selects which auth provider verifies sign-in credentials. The choice is made
//! once at startup.

use crate::error::ConfigResult;
use crate::validation::{
    validate_positive, validate_required_string, validate_site_path, validate_url, Validatable,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Auth provider strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProviderKind {
    /// Remote credential service reached over HTTP
    Remote,
    /// Fixed users from configuration, for local development and tests
    Static,
}

impl Default for AuthProviderKind {
    fn default() -> Self {
        AuthProviderKind::Remote
    }
}

impl fmt::Display for AuthProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthProviderKind::Remote => f.write_str("remote"),
            AuthProviderKind::Static => f.write_str("static"),
        }
    }
}

impl FromStr for AuthProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(AuthProviderKind::Remote),
            "static" => Ok(AuthProviderKind::Static),
            _ => Err(format!("Invalid auth provider: {}", s)),
        }
    }
}

/// User accepted by the static provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticUser {
    pub id: String,
    pub document: String,
    pub password: String,
    pub role: String,
}

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Provider strategy
    #[serde(default)]
    pub provider: AuthProviderKind,

    /// Base URL of the remote credential service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Login endpoint path relative to `base_url`
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Request timeout for the login call
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_timeout"
    )]
    pub timeout: Duration,

    /// Users for the static provider
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub static_users: Vec<StaticUser>,
}

impl GatewayConfig {
    /// Full URL of the login endpoint
    pub fn login_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.login_path.trim_start_matches('/')
        )
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: AuthProviderKind::default(),
            base_url: default_base_url(),
            login_path: default_login_path(),
            timeout: default_timeout(),
            static_users: Vec::new(),
        }
    }
}

impl Validatable for GatewayConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.timeout.as_secs(), "timeout", self.domain_name())?;

        match self.provider {
            AuthProviderKind::Remote => {
                validate_url(&self.base_url, "base_url", self.domain_name())?;
                validate_site_path(&self.login_path, "login_path", self.domain_name())?;
            }
            AuthProviderKind::Static => {
                if self.static_users.is_empty() {
                    return Err(self.validation_error("static provider requires at least one user"));
                }
                for user in &self.static_users {
                    validate_required_string(&user.document, "static_users.document", self.domain_name())?;
                    validate_required_string(&user.role, "static_users.role", self.domain_name())?;
                }
            }
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "gateway"
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}
