//! Services containing the verification use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    Clock, EntryOutcome, FocusTarget, InputController, InputOutcome, LockoutObserver,
    LockoutStatus, LockoutTimer, Navigator, SubmitOutcome, SystemClock, TwoFactorApi,
    TwoFactorVerificationFlow, VerificationClient, VerificationFlowConfig, VerificationState,
};
