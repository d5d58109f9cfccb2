//! Two-factor verification flow
//!
//! This module provides the client side of the second login step:
//! - Per-digit and whole-string code entry with a mode toggle
//! - Submission to the remote verification API with an explicit session
//! - Mapping of failures into displayable error and lockout state
//! - A cancellable lockout countdown

mod client;
mod config;
mod flow;
mod input;
mod lockout_timer;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use client::VerificationClient;
pub use config::VerificationFlowConfig;
pub use flow::TwoFactorVerificationFlow;
pub use input::InputController;
pub use lockout_timer::{LockoutObserver, LockoutTimer};
pub use traits::{Clock, FocusTarget, Navigator, SystemClock, TwoFactorApi};
pub use types::{EntryOutcome, InputOutcome, LockoutStatus, SubmitOutcome, VerificationState};
