//! Remote verification API client configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Connection settings for the remote two-factor API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiClientConfig {
    /// Base URL of the auth backend, without trailing slash
    pub base_url: String,

    /// Path of the authenticator code endpoint
    #[serde(default = "default_verify_path")]
    pub verify_path: String,

    /// Path of the backup code endpoint
    #[serde(default = "default_verify_backup_path")]
    pub verify_backup_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8080/api/v1"),
            verify_path: default_verify_path(),
            verify_backup_path: default_verify_backup_path(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiClientConfig {
    /// Create a configuration pointing at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Load configuration from `TWO_FACTOR_API_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("TWO_FACTOR_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            verify_path: env::var("TWO_FACTOR_API_VERIFY_PATH").unwrap_or(defaults.verify_path),
            verify_backup_path: env::var("TWO_FACTOR_API_VERIFY_BACKUP_PATH")
                .unwrap_or(defaults.verify_backup_path),
            request_timeout_secs: env::var("TWO_FACTOR_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            user_agent: defaults.user_agent,
        }
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Full URL of the authenticator code endpoint
    pub fn verify_url(&self) -> String {
        format!("{}{}", self.base_url, self.verify_path)
    }

    /// Full URL of the backup code endpoint
    pub fn verify_backup_url(&self) -> String {
        format!("{}{}", self.base_url, self.verify_backup_path)
    }
}

fn default_verify_path() -> String {
    String::from("/auth/2fa/verify")
}

fn default_verify_backup_path() -> String {
    String::from("/auth/2fa/verify-backup")
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    format!("twostep/{}", env!("CARGO_PKG_VERSION"))
}
