//! Tracing subscriber setup driven by [`LoggingConfig`]

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};
use crate::InfrastructureError;

/// Install the global fmt subscriber
///
/// `RUST_LOG` takes precedence over `config.level` when set. Fails if the
/// filter does not parse or a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => level_filter(&config.level)?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.colored)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    installed.map_err(|e| {
        InfrastructureError::Config(format!("Failed to install tracing subscriber: {}", e))
    })
}

/// Parse a level or filter directive such as `info` or `kt_core=debug,warn`
pub fn level_filter(level: &str) -> Result<EnvFilter, InfrastructureError> {
    EnvFilter::try_new(level)
        .map_err(|e| InfrastructureError::Config(format!("Invalid log level '{}': {}", level, e)))
}
