//! Verify/resend request lifecycle
//!
//! This module provides the client side of the email verification workflow:
//! - Verify requests with session persistence and delayed navigation
//! - Resend requests gated by the resend cooldown
//! - A single in-flight request at a time
//! - Conversion of every remote failure into alert text

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::SubmitterConfig;
pub use service::VerificationSubmitter;
pub use traits::{Navigator, VerificationApiTrait};
pub use types::{ApiMessage, ResendOtpRequest, VerifyOtpRequest, VerifyOtpResponse};
