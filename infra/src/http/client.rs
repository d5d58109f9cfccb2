//! reqwest-backed verification API client

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};
use ts_core::domain::value_objects::VerificationSuccess;
use ts_core::errors::TwoFactorError;
use ts_core::services::TwoFactorApi;
use ts_shared::config::ApiClientConfig;
use ts_shared::{VerifyBackupCodeRequest, VerifyCodeRequest};
use uuid::Uuid;

use super::errors::{map_error_response, parse_success_body};
use crate::InfrastructureError;

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Verification API over HTTP
///
/// Requests are authenticated with the session token as a bearer token.
/// Codes and tokens never appear in logs.
pub struct HttpTwoFactorApi {
    client: Client,
    config: ApiClientConfig,
}

impl HttpTwoFactorApi {
    /// Create a new client for the configured backend
    pub fn new(config: ApiClientConfig) -> Result<Self, InfrastructureError> {
        if config.base_url.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "Verification API base URL is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        info!(
            base_url = %config.base_url,
            timeout_secs = config.request_timeout_secs,
            event = "verification_api_initialized",
            "Verification API client initialized"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(ApiClientConfig::from_env())
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    async fn post<B: Serialize + Sync>(
        &self,
        url: &str,
        session_token: &str,
        body: &B,
    ) -> Result<VerificationSuccess, TwoFactorError> {
        let request_id = Uuid::new_v4();
        let started = Instant::now();
        debug!(url = %url, request_id = %request_id, "Sending verification request");

        let response = self
            .client
            .post(url)
            .bearer_auth(session_token)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(body)
            .send()
            .await
            .map_err(|err| {
                warn!(
                    url = %url,
                    request_id = %request_id,
                    error = %err,
                    event = "verification_request_failed",
                    "Verification request failed"
                );
                TwoFactorError::from(InfrastructureError::from(err))
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| TwoFactorError::from(InfrastructureError::from(err)))?;
        let latency_ms = started.elapsed().as_millis() as u64;

        if status.is_success() {
            debug!(
                request_id = %request_id,
                status = status.as_u16(),
                latency_ms,
                "Verification request accepted"
            );
            parse_success_body(&text)
        } else {
            let err = map_error_response(status, &text);
            debug!(
                request_id = %request_id,
                status = status.as_u16(),
                latency_ms,
                error = %err,
                "Verification request rejected"
            );
            Err(err)
        }
    }
}

#[async_trait]
impl TwoFactorApi for HttpTwoFactorApi {
    async fn verify_code(
        &self,
        user_id: &str,
        session_token: &str,
        code: &str,
    ) -> Result<VerificationSuccess, TwoFactorError> {
        let body = VerifyCodeRequest {
            user_id: user_id.to_string(),
            code: code.to_string(),
            is_backup: false,
        };
        self.post(&self.config.verify_url(), session_token, &body).await
    }

    async fn verify_backup_code(
        &self,
        user_id: &str,
        session_token: &str,
        code: &str,
    ) -> Result<VerificationSuccess, TwoFactorError> {
        let body = VerifyBackupCodeRequest {
            user_id: user_id.to_string(),
            code: code.to_string(),
        };
        self.post(&self.config.verify_backup_url(), session_token, &body)
            .await
    }
}
