//! Configuration loading and environment variable handling

use crate::domains::LendbookConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::str::FromStr;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "LENDBOOK".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML or JSON file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<LendbookConfig> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadError {
                path: path.to_path_buf(),
                source,
            })?;
        let mut config: LendbookConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|source| ConfigError::JsonError {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            serde_yaml::from_str(&content).map_err(|source| ConfigError::ParseError {
                path: path.to_path_buf(),
                source,
            })?
        };
        log::debug!("Loaded configuration from {}", path.display());

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<LendbookConfig> {
        let mut config = LendbookConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<LendbookConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut LendbookConfig) -> ConfigResult<()> {
        self.apply_server_overrides(&mut config.server)?;
        self.apply_session_overrides(&mut config.session)?;
        self.apply_gateway_overrides(&mut config.gateway)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    /// Apply server config overrides
    fn apply_server_overrides(
        &self,
        config: &mut crate::domains::server::ServerConfig,
    ) -> ConfigResult<()> {
        if let Ok(bind) = self.get_env_var("SERVER_BIND_ADDRESS") {
            config.bind_address = bind;
        }

        if let Ok(port) = self.get_env_var("SERVER_PORT") {
            config.port = port
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid SERVER_PORT: {}", e)))?;
        }

        if let Ok(environment) = self.get_env_var("ENVIRONMENT") {
            config.environment = crate::domains::server::Environment::from_str(&environment)
                .map_err(|_| ConfigError::EnvError(format!("Invalid ENVIRONMENT: {}", environment)))?;
        }

        Ok(())
    }

    /// Apply session config overrides
    fn apply_session_overrides(
        &self,
        config: &mut crate::domains::session::SessionConfig,
    ) -> ConfigResult<()> {
        if let Ok(secret) = self.get_env_var("SESSION_SECRET") {
            config.secret = secret;
        }

        if let Ok(ttl) = self.get_env_var("SESSION_TTL") {
            let seconds: u64 = ttl
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid SESSION_TTL: {}", e)))?;
            config.ttl = std::time::Duration::from_secs(seconds);
        }

        Ok(())
    }

    /// Apply gateway config overrides
    fn apply_gateway_overrides(
        &self,
        config: &mut crate::domains::gateway::GatewayConfig,
    ) -> ConfigResult<()> {
        if let Ok(url) = self.get_env_var("GATEWAY_URL") {
            config.base_url = url;
        }

        if let Ok(timeout) = self.get_env_var("GATEWAY_TIMEOUT") {
            let seconds: u64 = timeout
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid GATEWAY_TIMEOUT: {}", e)))?;
            config.timeout = std::time::Duration::from_secs(seconds);
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(
        &self,
        config: &mut crate::domains::logging::LoggingConfig,
    ) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
