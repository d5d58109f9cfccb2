//! Verification attempt entity for two-factor code submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_shared::code::{is_valid_backup_code, is_valid_totp, mask_code, normalize_backup_code};
use uuid::Uuid;

use crate::errors::ValidationError;

/// Length of an authenticator (TOTP) code
pub const TOTP_CODE_LENGTH: usize = 6;

/// Length of a backup code once hyphens and spaces are removed
pub const BACKUP_CODE_LENGTH: usize = 8;

/// Which kind of code the user is entering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMode {
    /// 6-digit code from an authenticator app
    #[default]
    Totp,
    /// 8-character single-use recovery code
    BackupCode,
}

impl VerificationMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            VerificationMode::Totp => VerificationMode::BackupCode,
            VerificationMode::BackupCode => VerificationMode::Totp,
        }
    }

    pub fn is_backup(&self) -> bool {
        matches!(self, VerificationMode::BackupCode)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationMode::Totp => "totp",
            VerificationMode::BackupCode => "backup_code",
        }
    }

    fn field_name(&self) -> &'static str {
        match self {
            VerificationMode::Totp => "authenticator code",
            VerificationMode::BackupCode => "backup code",
        }
    }
}

impl fmt::Display for VerificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated code ready to be sent to the verification API
///
/// Created on each submit and discarded once the response is handled.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationAttempt {
    /// Identifier correlating the log events of one submission
    pub id: Uuid,

    /// Which endpoint the code is meant for
    pub mode: VerificationMode,

    /// When the attempt was created
    pub created_at: DateTime<Utc>,

    code: String,
}

impl VerificationAttempt {
    /// Validate `code` for `mode` and build an attempt
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` when the code is empty, has the wrong
    /// length, or contains characters the mode does not allow.
    pub fn new(code: &str, mode: VerificationMode) -> Result<Self, ValidationError> {
        let code = match mode {
            VerificationMode::Totp => validate_totp(code)?,
            VerificationMode::BackupCode => validate_backup_code(code)?,
        };

        Ok(Self {
            id: Uuid::new_v4(),
            mode,
            created_at: Utc::now(),
            code,
        })
    }

    /// Build an authenticator code attempt
    pub fn totp(code: &str) -> Result<Self, ValidationError> {
        Self::new(code, VerificationMode::Totp)
    }

    /// Build a backup code attempt
    pub fn backup_code(code: &str) -> Result<Self, ValidationError> {
        Self::new(code, VerificationMode::BackupCode)
    }

    /// The normalized code
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Debug for VerificationAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationAttempt")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("created_at", &self.created_at)
            .field("code", &mask_code(&self.code))
            .finish()
    }
}

fn validate_totp(code: &str) -> Result<String, ValidationError> {
    let mode = VerificationMode::Totp;
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyCode {
            field: mode.field_name().to_string(),
        });
    }

    let actual = trimmed.chars().count();
    if actual != TOTP_CODE_LENGTH {
        return Err(ValidationError::InvalidLength {
            field: mode.field_name().to_string(),
            expected: TOTP_CODE_LENGTH,
            actual,
        });
    }

    if !is_valid_totp(trimmed) {
        return Err(ValidationError::InvalidCharacters {
            field: mode.field_name().to_string(),
        });
    }

    Ok(trimmed.to_string())
}

fn validate_backup_code(code: &str) -> Result<String, ValidationError> {
    let mode = VerificationMode::BackupCode;
    let normalized = normalize_backup_code(code);
    if normalized.is_empty() {
        return Err(ValidationError::EmptyCode {
            field: mode.field_name().to_string(),
        });
    }

    let actual = normalized.chars().count();
    if actual != BACKUP_CODE_LENGTH {
        return Err(ValidationError::InvalidLength {
            field: mode.field_name().to_string(),
            expected: BACKUP_CODE_LENGTH,
            actual,
        });
    }

    if !is_valid_backup_code(&normalized) {
        return Err(ValidationError::InvalidCharacters {
            field: mode.field_name().to_string(),
        });
    }

    Ok(normalized)
}
