//! Value objects representing immutable domain concepts.

pub mod session;
pub mod verification_outcome;

// Re-export commonly used types
pub use session::SessionContext;
pub use verification_outcome::{parse_two_factor_error, VerificationError, VerificationSuccess};
