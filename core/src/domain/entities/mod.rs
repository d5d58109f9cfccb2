//! Domain entities representing core business objects.

pub mod lockout;
pub mod verification_attempt;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use lockout::{format_countdown, remaining_seconds, LockoutState};
pub use verification_attempt::{
    VerificationAttempt, VerificationMode, BACKUP_CODE_LENGTH, TOTP_CODE_LENGTH,
};
