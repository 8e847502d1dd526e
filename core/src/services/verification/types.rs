//! Wire types of the verify and resend endpoints

use serde::{Deserialize, Serialize};

use crate::domain::entities::session::{SessionRecord, UserProfile};
use crate::errors::ApiError;

/// Body of `POST /api/user/verify-otp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Body of `POST /api/user/resend-otp`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResendOtpRequest {
    pub email: String,
}

/// Successful verify response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyOtpResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub data: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

impl VerifyOtpResponse {
    /// Session carried by the response
    ///
    /// A response without a token is a rejection even with a 2xx status.
    pub fn into_session(self, status: u16) -> Result<SessionRecord, ApiError> {
        match self.token.filter(|t| !t.trim().is_empty()) {
            Some(token) => Ok(SessionRecord::new(token, self.data.unwrap_or_default())),
            None => Err(ApiError::Rejected {
                status,
                message: self.message,
            }),
        }
    }
}

/// Any response body that may carry a human-readable message
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiMessage {
    /// Parse `body`, treating anything that is not a JSON object as "no message"
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}
