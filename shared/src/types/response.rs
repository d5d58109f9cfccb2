//! API response types and wrappers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,

    /// Response data (present on success)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error message (present on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Response timestamp
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,

    /// Request ID for tracing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Extract the data, consuming the response
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Payload returned by both verification endpoints on success
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponseData {
    /// One-time notice to surface to the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,

    /// Unused backup codes left on the account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_backup_codes: Option<u32>,
}

/// Body of an authenticator code verification request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    pub user_id: String,
    pub code: String,
    pub is_backup: bool,
}

/// Body of a backup code verification request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyBackupCodeRequest {
    pub user_id: String,
    pub code: String,
}
