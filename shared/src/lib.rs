//! Shared utilities and common types for TwoStep
//!
//! This crate provides common functionality used across all modules:
//! - Configuration types
//! - Wire error and response structures
//! - Verification code format utilities

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    ApiClientConfig, AppConfig, Environment, LogFormat, LoggingConfig, TwoFactorConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, VerifyBackupCodeRequest, VerifyCodeRequest, VerifyResponseData};
pub use utils::code;
