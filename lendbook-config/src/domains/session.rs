//! Session token and cookie configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Secret shipped for local development only. Rejected in production.
pub const DEVELOPMENT_SECRET: &str = "lendbook-development-secret-change-me!";

/// Minimum secret length accepted in production
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Longest session lifetime accepted
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// HMAC secret used to sign session tokens
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Issuer claim written into and required from session tokens
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Token lifetime and cookie `Max-Age`
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_ttl"
    )]
    pub ttl: Duration,

    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl SessionConfig {
    pub fn uses_development_secret(&self) -> bool {
        self.secret == DEVELOPMENT_SECRET
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            issuer: default_issuer(),
            ttl: default_ttl(),
            cookie_name: default_cookie_name(),
        }
    }
}

impl Validatable for SessionConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.secret, "secret", self.domain_name())?;
        validate_required_string(&self.issuer, "issuer", self.domain_name())?;
        validate_required_string(&self.cookie_name, "cookie_name", self.domain_name())?;
        validate_positive(self.ttl.as_secs(), "ttl", self.domain_name())?;
        if self.ttl > MAX_SESSION_TTL {
            return Err(self.validation_error(format!(
                "ttl of {}s exceeds the maximum of {}s",
                self.ttl.as_secs(),
                MAX_SESSION_TTL.as_secs()
            )));
        }

        if self
            .cookie_name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ';' | ',' | '='))
        {
            return Err(self.validation_error(format!(
                "cookie_name '{}' contains characters not allowed in a cookie name",
                self.cookie_name
            )));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "session"
    }
}

fn default_secret() -> String {
    DEVELOPMENT_SECRET.to_string()
}

fn default_issuer() -> String {
    "lendbook".to_string()
}

fn default_ttl() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}

fn default_cookie_name() -> String {
    "access_token".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "access_token");
        assert_eq!(config.ttl, Duration::from_secs(86400));
        assert!(config.uses_development_secret());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_cookie_name() {
        let config = SessionConfig {
            cookie_name: "access token".to_string(),
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_ttl_upper_bound() {
        let at_limit = SessionConfig {
            ttl: MAX_SESSION_TTL,
            ..SessionConfig::default()
        };
        assert!(at_limit.validate().is_ok());

        let huge = SessionConfig {
            ttl: Duration::from_secs(9_000_000_000_000),
            ..SessionConfig::default()
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let config = SessionConfig {
            ttl: Duration::from_secs(0),
            ..SessionConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
