//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured level when set.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ts_shared::config::{LogFormat, LoggingConfig};

use crate::InfrastructureError;

/// Build the level filter for `config`
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, InfrastructureError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level).map_err(|err| {
            InfrastructureError::Telemetry(format!("Invalid log level '{}': {}", config.level, err))
        }),
    }
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Fails when the level directive is invalid or a global subscriber is
/// already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(config.colored)
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_ansi(config.colored))
            .try_init(),
    };

    result.map_err(|err| InfrastructureError::Telemetry(err.to_string()))?;
    tracing::debug!(
        level = %config.level,
        format = ?config.format,
        event = "tracing_initialized",
        "Tracing initialized"
    );
    Ok(())
}
