//! Type definitions module
//!
//! - `response` - API response wrappers and verification payloads

pub mod response;

pub use response::{ApiResponse, VerifyBackupCodeRequest, VerifyCodeRequest, VerifyResponseData};
