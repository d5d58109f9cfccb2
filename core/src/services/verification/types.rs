//! Types for verification flow results and state snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{format_countdown, LockoutState, VerificationMode};
use crate::domain::value_objects::{VerificationError, VerificationSuccess};

/// Result of a single edit in the input controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Input changed, code not complete
    Updated,
    /// Every digit is filled in; carries the complete code
    Ready(String),
    /// Input rejected (non-digit, out of range, wrong mode)
    Ignored,
}

/// Result of a submitted verification attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Code accepted; navigation has been reset
    Verified(VerificationSuccess),
    /// Code refused or request failed; carries the display error
    Rejected(VerificationError),
}

impl SubmitOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, SubmitOutcome::Verified(_))
    }
}

/// Result of a digit edit routed through the flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Updated,
    Ignored,
    /// The edit completed the code and it was submitted
    Submitted(SubmitOutcome),
    /// The edit completed the code but auto-submit is off
    Ready,
}

/// Lockout countdown status published to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LockoutStatus {
    #[default]
    Idle,
    CountingDown {
        until: DateTime<Utc>,
        remaining_seconds: i64,
    },
}

impl LockoutStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, LockoutStatus::CountingDown { .. })
    }

    /// Countdown text, `None` when idle
    pub fn display(&self) -> Option<String> {
        match self {
            LockoutStatus::Idle => None,
            LockoutStatus::CountingDown {
                remaining_seconds, ..
            } => Some(format_countdown(*remaining_seconds)),
        }
    }
}

impl From<LockoutState> for LockoutStatus {
    fn from(state: LockoutState) -> Self {
        LockoutStatus::CountingDown {
            until: state.until,
            remaining_seconds: state.remaining_seconds,
        }
    }
}

/// Everything a screen needs to render the verification step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationState {
    pub mode: VerificationMode,
    /// One entry per TOTP digit box
    pub digits: Vec<Option<char>>,
    pub backup_code: String,
    pub focused_index: usize,
    /// A request is in flight
    pub loading: bool,
    pub error: Option<VerificationError>,
    pub attempts_remaining: Option<u32>,
    pub lockout: Option<LockoutState>,
    /// One-time notice from a successful verification
    pub warning: Option<String>,
    pub completed: bool,
}

impl VerificationState {
    /// Whether a new attempt may be submitted
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.completed && self.lockout.is_none()
    }

    /// Whether the inputs accept edits
    pub fn is_editable(&self) -> bool {
        self.can_submit()
    }

    /// Lockout countdown text, `None` when not locked out
    pub fn countdown(&self) -> Option<String> {
        self.lockout.map(|lockout| lockout.formatted())
    }

    /// TOTP digits entered so far
    pub fn code(&self) -> String {
        self.digits.iter().flatten().collect()
    }
}
