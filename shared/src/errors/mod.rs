//! Shared error response structure returned by the auth backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Detail key carrying the number of attempts left before a lockout
pub const DETAIL_ATTEMPTS_REMAINING: &str = "attempts_remaining";

/// Detail key carrying the RFC 3339 lockout expiry
pub const DETAIL_LOCKOUT_UNTIL: &str = "lockout_until";

/// Standard error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }

    fn detail(&self, key: &str) -> Option<&serde_json::Value> {
        self.details.as_ref().and_then(|d| d.get(key))
    }

    /// Attempts left before lockout, accepting numbers or numeric strings
    pub fn attempts_remaining(&self) -> Option<u32> {
        match self.detail(DETAIL_ATTEMPTS_REMAINING)? {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Lockout expiry, accepting RFC 3339 strings or unix seconds
    pub fn lockout_until(&self) -> Option<DateTime<Utc>> {
        match self.detail(DETAIL_LOCKOUT_UNTIL)? {
            serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
            _ => None,
        }
    }
}

/// Error codes used by the two-factor endpoints
pub mod error_codes {
    pub const INVALID_CODE: &str = "INVALID_CODE";
    pub const ACCOUNT_LOCKED: &str = "ACCOUNT_LOCKED";
    pub const SESSION_EXPIRED: &str = "SESSION_EXPIRED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const RATE_LIMIT_EXCEEDED: &str = "RATE_LIMIT_EXCEEDED";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
