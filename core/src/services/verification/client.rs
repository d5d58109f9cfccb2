//! Verification request client

use std::sync::Arc;

use crate::domain::entities::{VerificationAttempt, VerificationMode};
use crate::domain::value_objects::{parse_two_factor_error, SessionContext, VerificationSuccess};

use super::traits::{Navigator, TwoFactorApi};
use super::types::SubmitOutcome;

/// Sends attempts to the verification API and resets navigation on success
pub struct VerificationClient<A: TwoFactorApi, N: Navigator> {
    /// Remote verification API
    api: Arc<A>,
    /// Host navigation
    navigator: Arc<N>,
    /// Route to reset to after success
    authenticated_route: String,
    /// Backup code count that triggers a warning
    low_backup_code_threshold: u32,
}

impl<A: TwoFactorApi, N: Navigator> VerificationClient<A, N> {
    /// Create a new verification client
    ///
    /// # Arguments
    ///
    /// * `api` - Remote verification API
    /// * `navigator` - Navigation collaborator invoked on success
    /// * `authenticated_route` - Route the stack is reset to
    /// * `low_backup_code_threshold` - Warn at or below this many backup codes
    pub fn new(
        api: Arc<A>,
        navigator: Arc<N>,
        authenticated_route: impl Into<String>,
        low_backup_code_threshold: u32,
    ) -> Self {
        Self {
            api,
            navigator,
            authenticated_route: authenticated_route.into(),
            low_backup_code_threshold,
        }
    }

    /// Submit an attempt for the given session
    ///
    /// On success the navigator is reset to the authenticated route. Every
    /// failure, including transport errors, comes back as
    /// `SubmitOutcome::Rejected` with a displayable error.
    pub async fn submit(
        &self,
        context: &SessionContext,
        attempt: &VerificationAttempt,
    ) -> SubmitOutcome {
        tracing::info!(
            user_id = %context.user_id,
            attempt_id = %attempt.id,
            mode = %attempt.mode,
            event = "two_factor_submit",
            "Submitting two-factor verification code"
        );

        let result = match attempt.mode {
            VerificationMode::Totp => {
                self.api
                    .verify_code(&context.user_id, &context.session_token, attempt.code())
                    .await
            }
            VerificationMode::BackupCode => {
                self.api
                    .verify_backup_code(&context.user_id, &context.session_token, attempt.code())
                    .await
            }
        };

        match result {
            Ok(success) => {
                let success = self.with_backup_code_warning(attempt.mode, success);
                tracing::info!(
                    user_id = %context.user_id,
                    attempt_id = %attempt.id,
                    has_warning = success.warning.is_some(),
                    event = "two_factor_verified",
                    "Two-factor verification succeeded"
                );
                self.navigator.reset_to(&self.authenticated_route);
                SubmitOutcome::Verified(success)
            }
            Err(err) => {
                let parsed = parse_two_factor_error(&err);
                tracing::warn!(
                    user_id = %context.user_id,
                    attempt_id = %attempt.id,
                    error = %err,
                    attempts_remaining = ?parsed.attempts_remaining,
                    locked = parsed.is_lockout(),
                    event = "two_factor_rejected",
                    "Two-factor verification failed"
                );
                SubmitOutcome::Rejected(parsed)
            }
        }
    }

    fn with_backup_code_warning(
        &self,
        mode: VerificationMode,
        mut success: VerificationSuccess,
    ) -> VerificationSuccess {
        if success.warning.is_none() && mode.is_backup() {
            if let Some(remaining) = success.remaining_backup_codes {
                if remaining <= self.low_backup_code_threshold {
                    success.warning = Some(low_backup_code_warning(remaining));
                }
            }
        }
        success
    }
}

fn low_backup_code_warning(remaining: u32) -> String {
    match remaining {
        0 => "You have used your last backup code. Generate new backup codes in your security settings.".to_string(),
        1 => "You have 1 backup code left. Consider generating new backup codes.".to_string(),
        n => format!("You have {} backup codes left. Consider generating new backup codes.", n),
    }
}
