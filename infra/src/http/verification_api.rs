//! Verification API over HTTP
//!
//! Speaks the backend's JSON contract:
//!
//! - `POST /api/user/verify-otp` with `{"email", "otp"}`; a 2xx answer
//!   carries `{"token", "data"}`
//! - `POST /api/user/resend-otp` with `{"email"}`
//! - Non-2xx answers may carry `{"message"}`, shown to the user verbatim

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use otp_core::errors::ApiError;
use otp_core::services::verification::{
    ApiMessage, ResendOtpRequest, VerificationApiTrait, VerifyOtpRequest, VerifyOtpResponse,
};
use otp_core::SessionRecord;
use otp_shared::validation::mask_email;
use otp_shared::ApiConfig;

use crate::InfrastructureError;

/// reqwest-backed implementation of [`VerificationApiTrait`]
#[derive(Clone)]
pub struct HttpVerificationApi {
    client: Client,
    config: ApiConfig,
}

impl HttpVerificationApi {
    /// Create a client with the configured request timeout
    pub fn new(config: ApiConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        debug!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            "Verification API client created"
        );

        Ok(Self { client, config })
    }

    /// Create from `OTP_API_BASE_URL` and `OTP_API_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(ApiConfig::from_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// POST `body` as JSON, returning the status and raw response body
    async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<(u16, String), ApiError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport_error)?;
        Ok((status, text))
    }
}

#[async_trait]
impl VerificationApiTrait for HttpVerificationApi {
    async fn verify_otp(&self, email: &str, code: &str) -> Result<SessionRecord, ApiError> {
        let request = VerifyOtpRequest {
            email: email.to_string(),
            otp: code.to_string(),
        };

        let (status, body) = self.post_json(&self.config.verify_url(), &request).await?;
        debug!(email = %mask_email(email), status, "Verify response received");
        parse_verify_response(status, &body)
    }

    async fn resend_otp(&self, email: &str) -> Result<Option<String>, ApiError> {
        let request = ResendOtpRequest {
            email: email.to_string(),
        };

        let (status, body) = self.post_json(&self.config.resend_url(), &request).await?;
        debug!(email = %mask_email(email), status, "Resend response received");
        parse_resend_response(status, &body)
    }
}

/// Map a verify response to the session it carries
///
/// A 2xx body that is not valid JSON is a transport failure; a 2xx body
/// without a token is a rejection.
pub fn parse_verify_response(status: u16, body: &str) -> Result<SessionRecord, ApiError> {
    if !is_success(status) {
        return Err(rejection(status, body));
    }

    let response: VerifyOtpResponse = serde_json::from_str(body).map_err(|e| {
        warn!(status, error = %e, "Undecodable verify response body");
        ApiError::Transport(format!("Undecodable verify response: {}", e))
    })?;

    response.into_session(status)
}

/// Map a resend response to the optional server message
pub fn parse_resend_response(status: u16, body: &str) -> Result<Option<String>, ApiError> {
    if !is_success(status) {
        return Err(rejection(status, body));
    }
    Ok(ApiMessage::from_body(body).message)
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn rejection(status: u16, body: &str) -> ApiError {
    ApiError::Rejected {
        status,
        message: ApiMessage::from_body(body).message,
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        warn!("Verification API request timed out");
    } else {
        warn!(error = %err, "Verification API request failed");
    }
    ApiError::Transport(err.to_string())
}
