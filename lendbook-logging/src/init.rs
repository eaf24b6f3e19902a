use anyhow::Result;
use lendbook_config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Build the `EnvFilter` described by the configuration
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let mut filter = EnvFilter::try_new(config.level.to_string())
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    for directive in &config.directives {
        let directive = directive
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid log directive '{}': {}", directive, e))?;
        filter = filter.add_directive(directive);
    }

    Ok(filter)
}

/// Initialize logging from configuration.
///
/// A global subscriber that is already installed is left in place.
pub fn init_logging_from_config(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    // Use try_init to avoid panic if global subscriber already set
    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}
