//! Domain-specific error types and error handling.

mod types;

pub use types::{FlowError, TwoFactorError, ValidationError};

use thiserror::Error;

/// Errors returned by the verification flow
///
/// Remote failures are not in here: the flow reports them as
/// `SubmitOutcome::Rejected`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    // Bridge to specific error types
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Flow(#[from] FlowError),
}

pub type DomainResult<T> = Result<T, DomainError>;
