//! # Infrastructure Layer
//!
//! Concrete implementations behind the verification flow's seams:
//!
//! - **HTTP**: [`HttpTwoFactorApi`], the reqwest client for the verification API
//! - **Mock**: [`MockTwoFactorApi`], an in-memory backend for development and tests
//! - **Telemetry**: tracing subscriber setup
//! - **Configuration**: `.env` aware loading of [`AppConfig`]

use ts_shared::config::AppConfig;

pub mod http;
pub mod mock;
pub mod telemetry;

pub use http::HttpTwoFactorApi;
pub use mock::MockTwoFactorApi;

/// Load application configuration
///
/// Reads the environment-specific `.env` file (e.g. `.env.production`) when
/// present, then `.env`, then the process environment.
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    let environment = ts_shared::config::Environment::from_env();
    if let Err(err) = dotenvy::from_filename(environment.env_file()) {
        if !err.not_found() {
            return Err(InfrastructureError::Config(format!(
                "Failed to read {}: {}",
                environment.env_file(),
                err
            )));
        }
    }
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    if config.api.base_url.is_empty() {
        return Err(InfrastructureError::Config(
            "TWO_FACTOR_API_URL must not be empty".to_string(),
        ));
    }

    tracing::debug!(
        environment = %config.environment,
        base_url = %config.api.base_url,
        event = "config_loaded",
        "Configuration loaded"
    );
    Ok(config)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP client error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Logging setup error
    #[error("Telemetry error: {0}")]
    Telemetry(String),
}
