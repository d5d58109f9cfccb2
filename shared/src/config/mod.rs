//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `api` - Remote verification API client settings
//! - `environment` - Environment detection and logging configuration
//! - `two_factor` - Verification flow behaviour (countdown, auto-submit, routes)

pub mod api;
pub mod environment;
pub mod two_factor;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use api::ApiClientConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use two_factor::{TwoFactorConfig, DEFAULT_AUTHENTICATED_ROUTE};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Verification flow configuration
    #[serde(default)]
    pub two_factor: TwoFactorConfig,

    /// Remote API configuration
    #[serde(default)]
    pub api: ApiClientConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API base URL used by production builds unless `TWO_FACTOR_API_URL` is set
pub const PRODUCTION_API_URL: &str = "https://api.twostep.app/api/v1";

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in profile for an environment
    ///
    /// Production talks to the hosted API with a tighter timeout. Every
    /// other environment uses the local API defaults.
    pub fn for_environment(environment: Environment) -> Self {
        let api = match environment {
            Environment::Production => {
                ApiClientConfig::new(PRODUCTION_API_URL).with_timeout_secs(10)
            }
            Environment::Development | Environment::Staging => ApiClientConfig::default(),
        };
        Self {
            environment,
            two_factor: TwoFactorConfig::default(),
            api,
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from environment
    ///
    /// Starts from the profile of the detected environment and applies the
    /// variables that are set.
    pub fn from_env() -> Self {
        let base = Self::for_environment(Environment::from_env());

        let mut api = ApiClientConfig::from_env();
        if std::env::var("TWO_FACTOR_API_URL").is_err() {
            api.base_url = base.api.base_url.clone();
        }
        if std::env::var("TWO_FACTOR_API_TIMEOUT_SECS").is_err() {
            api.request_timeout_secs = base.api.request_timeout_secs;
        }

        Self {
            two_factor: TwoFactorConfig::from_env(),
            api,
            logging: base.logging.clone().with_env_overrides(),
            ..base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_profile() {
        let config = AppConfig::for_environment(Environment::Production);
        assert_eq!(config.api.base_url, PRODUCTION_API_URL);
        assert_eq!(config.api.request_timeout_secs, 10);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_staging_uses_local_api_defaults() {
        let config = AppConfig::for_environment(Environment::Staging);
        assert_eq!(config.api.base_url, ApiClientConfig::default().base_url);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_deserialize_minimal() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "environment": "staging", "api": { "base_url": "http://127.0.0.1:9000" } }"#,
        )
        .unwrap();
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.api.verify_path, "/auth/2fa/verify");
        assert_eq!(config.two_factor.countdown_tick_ms, 1000);
    }
}
