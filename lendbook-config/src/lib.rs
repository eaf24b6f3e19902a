//! Domain-driven configuration management for Lendbook
//!
//! Configuration is split by functional domain (server, session, gateway,
//! access, logging), each with validation, defaults, and environment variable
//! overrides.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    access::AccessConfig,
    gateway::{AuthProviderKind, GatewayConfig, StaticUser},
    logging::{LogFormat, LogLevel, LoggingConfig},
    server::{Environment, ServerConfig},
    session::SessionConfig,
    LendbookConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
