//! Configuration for the verification flow

use std::time::Duration;

use ts_shared::config::{TwoFactorConfig, DEFAULT_AUTHENTICATED_ROUTE};

/// Runtime settings for a verification flow
#[derive(Debug, Clone)]
pub struct VerificationFlowConfig {
    /// Submit as soon as the last digit is entered
    pub auto_submit: bool,
    /// How often the lockout countdown is recomputed
    pub countdown_tick: Duration,
    /// Synthesize a warning at or below this many backup codes
    pub low_backup_code_threshold: u32,
    /// Route navigation is reset to after success
    pub authenticated_route: String,
}

impl Default for VerificationFlowConfig {
    fn default() -> Self {
        Self {
            auto_submit: true,
            countdown_tick: Duration::from_secs(1),
            low_backup_code_threshold: 3,
            authenticated_route: DEFAULT_AUTHENTICATED_ROUTE.to_string(),
        }
    }
}

impl From<&TwoFactorConfig> for VerificationFlowConfig {
    fn from(config: &TwoFactorConfig) -> Self {
        Self {
            auto_submit: config.auto_submit,
            countdown_tick: Duration::from_millis(config.countdown_tick_ms.max(1)),
            low_backup_code_threshold: config.low_backup_code_threshold,
            authenticated_route: config.authenticated_route.clone(),
        }
    }
}
