//! Collaborator traits for the verification flow
//!
//! The remote API, navigation and widget focus live outside this crate; the
//! flow only talks to them through these seams.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::value_objects::VerificationSuccess;
use crate::errors::TwoFactorError;

/// Remote two-factor verification API
#[async_trait]
pub trait TwoFactorApi: Send + Sync {
    /// Verify an authenticator app code
    async fn verify_code(
        &self,
        user_id: &str,
        session_token: &str,
        code: &str,
    ) -> Result<VerificationSuccess, TwoFactorError>;

    /// Verify a single-use backup code
    async fn verify_backup_code(
        &self,
        user_id: &str,
        session_token: &str,
        code: &str,
    ) -> Result<VerificationSuccess, TwoFactorError>;
}

/// Host navigation
pub trait Navigator: Send + Sync {
    /// Replace the navigation stack with `route`
    fn reset_to(&self, route: &str);
}

/// Per-digit input widgets
pub trait FocusTarget: Send + Sync {
    /// Move keyboard focus to the digit box at `index`
    fn focus_digit(&self, index: usize);
}

/// Hosts without focusable widgets
impl FocusTarget for () {
    fn focus_digit(&self, _index: usize) {}
}

/// Wall clock used by the lockout countdown
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// System wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
