//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Why the access core configuration could not be loaded
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    FileReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config file {} is not valid YAML: {source}", path.display())]
    ParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Config file {} is not valid JSON: {source}", path.display())]
    JsonError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Settings that are valid alone but unsafe together, such as a
    /// development secret in production
    #[error("Refusing configuration: {0}")]
    ValidationError(String),

    #[error("Environment override rejected: {0}")]
    EnvError(String),

    /// A single setting in one domain (`session`, `gateway`, ...) is invalid
    #[error("Invalid {domain} setting: {message}")]
    DomainError { domain: String, message: String },
}
