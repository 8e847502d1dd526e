//! Traits for backend and navigation integration

use async_trait::async_trait;

use crate::domain::entities::session::SessionRecord;
use crate::errors::ApiError;

/// Remote verification API
#[async_trait]
pub trait VerificationApiTrait: Send + Sync {
    /// Submit `code` for `email`; a success carries the new session
    async fn verify_otp(&self, email: &str, code: &str) -> Result<SessionRecord, ApiError>;

    /// Ask the backend to send a fresh code to `email`
    ///
    /// Returns the server's message, if it sent one.
    async fn resend_otp(&self, email: &str) -> Result<Option<String>, ApiError>;
}

/// Route change capability of the host application
pub trait Navigator: Send + Sync {
    fn navigate(&self, destination: &str);
}
