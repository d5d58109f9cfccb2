//! Error types for the two-factor verification flow
//!
//! Three layers are kept apart:
//! - `ValidationError` for malformed input caught before any network call
//! - `TwoFactorError` for outcomes reported by the remote verification API
//! - `FlowError` for submissions the flow refuses in its current state

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::entities::VerificationMode;

/// Input validation errors
///
/// These are shown to the user as a blocking alert; no request is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your {field}")]
    EmptyCode { field: String },

    #[error("Invalid length: {field} (expected: {expected}, actual: {actual})")]
    InvalidLength {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid characters in {field}")]
    InvalidCharacters { field: String },
}

/// Outcomes reported by the remote verification API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TwoFactorError {
    #[error("{message}")]
    InvalidCode {
        message: String,
        attempts_remaining: Option<u32>,
    },

    #[error("{message}")]
    LockedOut {
        message: String,
        until: Option<DateTime<Utc>>,
    },

    #[error("Session expired")]
    SessionExpired,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Unexpected(String),
}

/// Submissions refused by the flow itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("Verification locked for {remaining_seconds} more seconds")]
    LockedOut { remaining_seconds: i64 },

    #[error("A verification request is already in flight")]
    RequestInFlight,

    #[error("Verification already completed")]
    AlreadyVerified,

    #[error("Input not accepted in {current} mode")]
    WrongMode { current: VerificationMode },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let error = ValidationError::InvalidLength {
            field: "authenticator code".to_string(),
            expected: 6,
            actual: 5,
        };
        let message = error.to_string();
        assert!(message.contains("authenticator code"));
        assert!(message.contains("expected: 6"));
    }

    #[test]
    fn test_remote_error_displays_server_message() {
        let error = TwoFactorError::InvalidCode {
            message: "Invalid code. 2 attempts remaining".to_string(),
            attempts_remaining: Some(2),
        };
        assert_eq!(error.to_string(), "Invalid code. 2 attempts remaining");
    }

    #[test]
    fn test_flow_error_messages() {
        let error = FlowError::WrongMode {
            current: VerificationMode::BackupCode,
        };
        assert_eq!(error.to_string(), "Input not accepted in backup_code mode");
        assert!(FlowError::LockedOut { remaining_seconds: 42 }
            .to_string()
            .contains("42"));
    }
}
