//! # TwoStep Core
//!
//! Client-side two-factor verification for TwoStep.
//! This crate contains the domain entities, error types, collaborator traits
//! and the verification flow that drives code entry, submission and lockout.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
