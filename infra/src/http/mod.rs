//! HTTP implementation of the verification API
//!
//! Talks to the auth backend's `/auth/2fa/*` endpoints with reqwest and maps
//! its error bodies into [`TwoFactorError`](ts_core::errors::TwoFactorError).

mod client;
mod errors;

pub use client::{HttpTwoFactorApi, REQUEST_ID_HEADER};
pub use errors::{map_error_response, parse_success_body};
