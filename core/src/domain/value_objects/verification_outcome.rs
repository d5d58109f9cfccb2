//! Displayable verification outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TwoFactorError;

const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";
const NETWORK_MESSAGE: &str = "Unable to reach the server. Check your connection and try again.";
const UNEXPECTED_MESSAGE: &str = "Verification failed. Please try again.";
const LOCKED_MESSAGE: &str = "Too many failed attempts. Please wait before trying again.";
const INVALID_CODE_MESSAGE: &str = "Invalid verification code.";

/// A failed verification as the user should see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationError {
    /// Inline error text
    pub message: String,

    /// Attempts left before the server locks verification
    pub attempts_remaining: Option<u32>,

    /// When a server-enforced lockout ends
    pub lockout_until: Option<DateTime<Utc>>,
}

impl VerificationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            attempts_remaining: None,
            lockout_until: None,
        }
    }

    pub fn is_lockout(&self) -> bool {
        self.lockout_until.is_some()
    }
}

impl From<&TwoFactorError> for VerificationError {
    fn from(err: &TwoFactorError) -> Self {
        parse_two_factor_error(err)
    }
}

/// Map a remote failure into display state
pub fn parse_two_factor_error(err: &TwoFactorError) -> VerificationError {
    match err {
        TwoFactorError::InvalidCode {
            message,
            attempts_remaining,
        } => VerificationError {
            message: non_empty_or(message, INVALID_CODE_MESSAGE),
            attempts_remaining: *attempts_remaining,
            lockout_until: None,
        },
        TwoFactorError::LockedOut { message, until } => VerificationError {
            message: non_empty_or(message, LOCKED_MESSAGE),
            attempts_remaining: Some(0),
            lockout_until: *until,
        },
        TwoFactorError::SessionExpired => VerificationError::new(SESSION_EXPIRED_MESSAGE),
        TwoFactorError::Network(_) => VerificationError::new(NETWORK_MESSAGE),
        TwoFactorError::Unexpected(_) => VerificationError::new(UNEXPECTED_MESSAGE),
    }
}

fn non_empty_or(message: &str, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    }
}

/// A successful verification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSuccess {
    /// One-time notice, e.g. few backup codes left
    pub warning: Option<String>,

    /// Unused backup codes left on the account, when reported
    pub remaining_backup_codes: Option<u32>,
}
