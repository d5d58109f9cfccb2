//! Two-factor verification flow configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Route the flow resets navigation to after a successful verification
pub const DEFAULT_AUTHENTICATED_ROUTE: &str = "Main";

/// Client-side settings for the verification flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TwoFactorConfig {
    /// Countdown refresh interval in milliseconds
    #[serde(default = "default_countdown_tick_ms")]
    pub countdown_tick_ms: u64,

    /// Submit automatically once every digit is filled in
    #[serde(default = "default_auto_submit")]
    pub auto_submit: bool,

    /// Warn the user when this many backup codes or fewer remain
    #[serde(default = "default_low_backup_code_threshold")]
    pub low_backup_code_threshold: u32,

    /// Navigation root for authenticated users
    #[serde(default = "default_authenticated_route")]
    pub authenticated_route: String,
}

impl Default for TwoFactorConfig {
    fn default() -> Self {
        Self {
            countdown_tick_ms: default_countdown_tick_ms(),
            auto_submit: default_auto_submit(),
            low_backup_code_threshold: default_low_backup_code_threshold(),
            authenticated_route: default_authenticated_route(),
        }
    }
}

impl TwoFactorConfig {
    /// Load overrides from `TWO_FACTOR_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            countdown_tick_ms: env::var("TWO_FACTOR_COUNTDOWN_TICK_MS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.countdown_tick_ms),
            auto_submit: env::var("TWO_FACTOR_AUTO_SUBMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.auto_submit),
            low_backup_code_threshold: env::var("TWO_FACTOR_LOW_BACKUP_CODES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.low_backup_code_threshold),
            authenticated_route: env::var("TWO_FACTOR_AUTHENTICATED_ROUTE")
                .unwrap_or(defaults.authenticated_route),
        }
    }

    /// Disable automatic submission of complete codes
    pub fn without_auto_submit(mut self) -> Self {
        self.auto_submit = false;
        self
    }
}

fn default_countdown_tick_ms() -> u64 {
    1000
}

fn default_auto_submit() -> bool {
    true
}

fn default_low_backup_code_threshold() -> u32 {
    3
}

fn default_authenticated_route() -> String {
    String::from(DEFAULT_AUTHENTICATED_ROUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TwoFactorConfig::default();
        assert_eq!(config.countdown_tick_ms, 1000);
        assert!(config.auto_submit);
        assert_eq!(config.authenticated_route, "Main");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: TwoFactorConfig =
            serde_json::from_str(r#"{ "low_backup_code_threshold": 5 }"#).unwrap();
        assert_eq!(config.low_backup_code_threshold, 5);
        assert!(config.auto_submit);
    }

    #[test]
    fn test_without_auto_submit() {
        assert!(!TwoFactorConfig::default().without_auto_submit().auto_submit);
    }
}
