//! Domain-specific configuration modules

pub mod access;
pub mod gateway;
pub mod logging;
pub mod server;
pub mod session;
pub mod utils;

use crate::error::{ConfigError, ConfigResult};
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main Lendbook configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LendbookConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: server::ServerConfig,

    /// Session token and cookie configuration
    #[serde(default)]
    pub session: session::SessionConfig,

    /// Credential gateway configuration
    #[serde(default)]
    pub gateway: gateway::GatewayConfig,

    /// Route access configuration
    #[serde(default)]
    pub access: access::AccessConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl LendbookConfig {
    /// Validate all domain configurations and the rules spanning them
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.server.validate()?;
        self.session.validate()?;
        self.gateway.validate()?;
        self.access.validate()?;
        self.logging.validate()?;

        if self.server.environment.is_production() {
            if self.session.uses_development_secret()
                || self.session.secret.len() < session::MIN_PRODUCTION_SECRET_LEN
            {
                return Err(ConfigError::ValidationError(format!(
                    "session secret must be set and at least {} characters long in production",
                    session::MIN_PRODUCTION_SECRET_LEN
                )));
            }

            if self.gateway.provider == gateway::AuthProviderKind::Static {
                return Err(ConfigError::ValidationError(
                    "static auth provider is not allowed in production".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = LendbookConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
