//! Error types for RBAC operations

use thiserror::Error;

/// Result type for RBAC operations
pub type RbacResult<T> = Result<T, RbacError>;

/// RBAC-specific errors
#[derive(Error, Debug)]
pub enum RbacError {
    /// Two navigation sections share the same role key
    #[error("Duplicate navigation section: {key}")]
    DuplicateSection { key: String },

    /// Two items of one section share the same key
    #[error("Duplicate navigation item '{item}' in section {section}")]
    DuplicateItem { section: String, item: String },

    /// Circular role inheritance detected
    #[error("Circular role inheritance detected involving role: {role_name}")]
    CircularInheritance { role_name: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Navigation file could not be read
    #[error("Failed to read navigation file: {0}")]
    Io(#[from] std::io::Error),

    /// Navigation YAML could not be parsed
    #[error("Failed to parse navigation: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RbacError {
    /// Create a new invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
