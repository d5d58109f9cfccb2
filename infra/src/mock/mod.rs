//! Mock Verification Backend
//!
//! An in-memory stand-in for the auth backend's two-factor endpoints, for
//! development and integration tests. It enforces the same rules the real
//! backend does:
//!
//! - One valid authenticator code
//! - Single-use backup codes
//! - A lockout after too many consecutive failures
//! - Timing-safe code comparison

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use tracing::{info, warn};
use ts_core::domain::entities::{BACKUP_CODE_LENGTH, TOTP_CODE_LENGTH};
use ts_core::domain::value_objects::VerificationSuccess;
use ts_core::errors::TwoFactorError;
use ts_core::services::{Clock, SystemClock, TwoFactorApi};


const BACKUP_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Rules enforced by the mock backend
#[derive(Debug, Clone)]
pub struct MockBackendConfig {
    /// Consecutive failures that trigger a lockout
    pub max_failed_attempts: u32,
    /// How long a lockout lasts
    pub lockout_duration: chrono::Duration,
    /// Send a server-side warning at or below this many backup codes
    pub low_backup_code_warning_at: Option<u32>,
    /// Artificial delay before every response
    pub latency: Duration,
}

impl Default for MockBackendConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            lockout_duration: chrono::Duration::minutes(15),
            low_backup_code_warning_at: None,
            latency: Duration::ZERO,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct AccountState {
    failed_attempts: u32,
    locked_until: Option<DateTime<Utc>>,
}

/// In-memory two-factor backend
pub struct MockTwoFactorApi {
    totp_code: String,
    backup_codes: Mutex<Vec<String>>,
    session_token: Option<String>,
    accounts: Mutex<HashMap<String, AccountState>>,
    request_count: Arc<AtomicU64>,
    clock: Arc<dyn Clock>,
    config: MockBackendConfig,
}

impl MockTwoFactorApi {
    /// Create a backend accepting `totp_code` and the given backup codes
    pub fn new(totp_code: impl Into<String>, backup_codes: Vec<String>) -> Self {
        Self {
            totp_code: totp_code.into(),
            backup_codes: Mutex::new(backup_codes),
            session_token: None,
            accounts: Mutex::new(HashMap::new()),
            request_count: Arc::new(AtomicU64::new(0)),
            clock: Arc::new(SystemClock),
            config: MockBackendConfig::default(),
        }
    }

    /// Create a backend with a random authenticator code and `backup_count`
    /// random backup codes
    pub fn generated(backup_count: usize) -> Self {
        Self::new(generate_totp_code(), generate_backup_codes(backup_count))
    }

    pub fn with_config(mut self, config: MockBackendConfig) -> Self {
        self.config = config;
        self
    }

    /// Only accept requests carrying this session token
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The accepted authenticator code
    pub fn totp_code(&self) -> &str {
        &self.totp_code
    }

    /// Unused backup codes
    pub fn backup_codes(&self) -> Vec<String> {
        self.backup_codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn remaining_backup_codes(&self) -> u32 {
        self.backup_codes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len() as u32
    }

    /// Consecutive failures recorded for `user_id`
    pub fn failed_attempts(&self, user_id: &str) -> u32 {
        self.accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .map(|account| account.failed_attempts)
            .unwrap_or(0)
    }

    /// When the lockout for `user_id` ends, if one is active
    pub fn locked_until(&self, user_id: &str) -> Option<DateTime<Utc>> {
        let now = self.clock.now();
        self.accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .and_then(|account| account.locked_until)
            .filter(|until| *until > now)
    }

    /// Total verification requests received
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Clear failures and lockouts for every account
    pub fn reset_accounts(&self) {
        self.accounts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    async fn verify(
        &self,
        user_id: &str,
        session_token: &str,
        is_backup: bool,
        code: &str,
    ) -> Result<VerificationSuccess, TwoFactorError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        if let Some(expected) = &self.session_token {
            if !constant_time_compare(expected, session_token) {
                warn!(user_id = %user_id, event = "mock_session_rejected", "Session token rejected");
                return Err(TwoFactorError::SessionExpired);
            }
        }

        let now = self.clock.now();
        let mut accounts = self.accounts.lock().unwrap_or_else(PoisonError::into_inner);
        let account = accounts.entry(user_id.to_string()).or_default();

        match account.locked_until {
            Some(until) if until > now => {
                return Err(TwoFactorError::LockedOut {
                    message: "Too many failed attempts. Please try again later.".to_string(),
                    until: Some(until),
                });
            }
            Some(_) => *account = AccountState::default(),
            None => {}
        }

        let accepted = if is_backup {
            self.consume_backup_code(code)
        } else {
            constant_time_compare(&self.totp_code, code)
        };

        if accepted {
            *account = AccountState::default();
            let remaining = is_backup.then(|| self.remaining_backup_codes());
            info!(
                user_id = %user_id,
                is_backup,
                remaining_backup_codes = ?remaining,
                event = "mock_verification_accepted",
                "Mock backend accepted code"
            );
            return Ok(VerificationSuccess {
                warning: remaining.and_then(|left| self.server_warning(left)),
                remaining_backup_codes: remaining,
            });
        }

        account.failed_attempts += 1;
        if account.failed_attempts >= self.config.max_failed_attempts {
            let until = now + self.config.lockout_duration;
            *account = AccountState {
                failed_attempts: 0,
                locked_until: Some(until),
            };
            warn!(
                user_id = %user_id,
                until = %until,
                event = "mock_account_locked",
                "Mock backend locked account"
            );
            return Err(TwoFactorError::LockedOut {
                message: "Too many failed attempts. Please try again later.".to_string(),
                until: Some(until),
            });
        }

        let attempts_remaining = self.config.max_failed_attempts - account.failed_attempts;
        info!(
            user_id = %user_id,
            is_backup,
            attempts_remaining,
            event = "mock_verification_rejected",
            "Mock backend rejected code"
        );
        Err(TwoFactorError::InvalidCode {
            message: "Invalid verification code".to_string(),
            attempts_remaining: Some(attempts_remaining),
        })
    }

    fn consume_backup_code(&self, code: &str) -> bool {
        let mut codes = self.backup_codes.lock().unwrap_or_else(PoisonError::into_inner);
        // Compare against every code so timing does not reveal the position
        let mut matched = None;
        for (index, candidate) in codes.iter().enumerate() {
            if constant_time_compare(candidate, code) && matched.is_none() {
                matched = Some(index);
            }
        }
        match matched {
            Some(index) => {
                codes.remove(index);
                true
            }
            None => false,
        }
    }

    fn server_warning(&self, remaining: u32) -> Option<String> {
        let threshold = self.config.low_backup_code_warning_at?;
        (remaining <= threshold)
            .then(|| format!("Only {} backup codes remaining", remaining))
    }
}

impl Default for MockTwoFactorApi {
    fn default() -> Self {
        Self::generated(10)
    }
}

#[async_trait]
impl TwoFactorApi for MockTwoFactorApi {
    async fn verify_code(
        &self,
        user_id: &str,
        session_token: &str,
        code: &str,
    ) -> Result<VerificationSuccess, TwoFactorError> {
        self.verify(user_id, session_token, false, code).await
    }

    async fn verify_backup_code(
        &self,
        user_id: &str,
        session_token: &str,
        code: &str,
    ) -> Result<VerificationSuccess, TwoFactorError> {
        self.verify(user_id, session_token, true, code).await
    }
}

/// Generate a random authenticator code
pub fn generate_totp_code() -> String {
    let mut rng = rand::thread_rng();
    let code: u32 = rng.gen_range(0..1_000_000);
    format!("{:0width$}", code, width = TOTP_CODE_LENGTH)
}

/// Generate `count` random backup codes
pub fn generate_backup_codes(count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            (0..BACKUP_CODE_LENGTH)
                .map(|_| BACKUP_CODE_ALPHABET[rng.gen_range(0..BACKUP_CODE_ALPHABET.len())] as char)
                .collect()
        })
        .collect()
}

fn constant_time_compare(expected: &str, provided: &str) -> bool {
    if expected.len() != provided.len() {
        return false;
    }
    constant_time_eq(expected.as_bytes(), provided.as_bytes())
}
