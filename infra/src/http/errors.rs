//! Response body mapping

use reqwest::StatusCode;
use ts_core::domain::value_objects::VerificationSuccess;
use ts_core::errors::TwoFactorError;
use ts_shared::{error_codes, ApiResponse, ErrorResponse, VerifyResponseData};

use crate::InfrastructureError;

/// Map a non-success response into a remote verification error
///
/// The backend error code decides the variant. Bodies without a known code
/// fall back to the status.
pub fn map_error_response(status: StatusCode, body: &str) -> TwoFactorError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(response) => match response.error.as_str() {
            error_codes::INVALID_CODE | error_codes::VALIDATION_ERROR => {
                TwoFactorError::InvalidCode {
                    attempts_remaining: response.attempts_remaining(),
                    message: response.message,
                }
            }
            error_codes::ACCOUNT_LOCKED | error_codes::RATE_LIMIT_EXCEEDED => {
                TwoFactorError::LockedOut {
                    until: response.lockout_until(),
                    message: response.message,
                }
            }
            error_codes::SESSION_EXPIRED => TwoFactorError::SessionExpired,
            _ => map_status(status, Some(response.message)),
        },
        Err(_) => map_status(status, None),
    }
}

fn map_status(status: StatusCode, message: Option<String>) -> TwoFactorError {
    match status {
        StatusCode::LOCKED | StatusCode::TOO_MANY_REQUESTS => TwoFactorError::LockedOut {
            message: message.unwrap_or_default(),
            until: None,
        },
        _ => TwoFactorError::Unexpected(
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("Unexpected response status {}", status)),
        ),
    }
}

/// Decode a 2xx body
pub fn parse_success_body(body: &str) -> Result<VerificationSuccess, TwoFactorError> {
    let response: ApiResponse<VerifyResponseData> = serde_json::from_str(body)
        .map_err(|err| TwoFactorError::from(InfrastructureError::from(err)))?;

    if !response.success {
        return Err(TwoFactorError::Unexpected(
            response
                .error
                .unwrap_or_else(|| "Verification was not accepted".to_string()),
        ));
    }

    let data = response.into_data().unwrap_or_default();
    Ok(VerificationSuccess {
        warning: data.warning,
        remaining_backup_codes: data.remaining_backup_codes,
    })
}

impl From<InfrastructureError> for TwoFactorError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Http(err) if err.is_timeout() => {
                TwoFactorError::Network("Request timed out".to_string())
            }
            InfrastructureError::Http(err) if err.is_connect() || err.is_request() => {
                TwoFactorError::Network(err.to_string())
            }
            InfrastructureError::Serialization(err) => {
                TwoFactorError::Unexpected(format!("Malformed response: {}", err))
            }
            other => TwoFactorError::Unexpected(other.to_string()),
        }
    }
}
