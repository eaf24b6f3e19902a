//! Logging setup for Lendbook
//!
//! Installs a global `tracing` subscriber from [`LoggingConfig`]: level and
//! extra filter directives, plus one of the text, compact, pretty or JSON
//! output formats. `RUST_LOG` is honored when the configured level is invalid.

pub mod init;

pub use init::{build_env_filter, init_logging_from_config};
pub use lendbook_config::{LogFormat, LogLevel, LoggingConfig};
