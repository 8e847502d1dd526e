//! Verification flow configuration: backend endpoints, timings and messages

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default production backend of the CarHub marketplace
pub const DEFAULT_API_BASE_URL: &str = "https://carhubbackend-production.up.railway.app";

/// Backend endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the backend (no trailing slash)
    pub base_url: String,

    /// Path of the verify endpoint
    #[serde(default = "default_verify_path")]
    pub verify_path: String,

    /// Path of the resend endpoint
    #[serde(default = "default_resend_path")]
    pub resend_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            verify_path: default_verify_path(),
            resend_path: default_resend_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Create a configuration pointing at a different backend
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Load from `OTP_API_BASE_URL` and `OTP_API_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("OTP_API_BASE_URL").unwrap_or(defaults.base_url),
            timeout_secs: env::var("OTP_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            ..defaults
        }
    }

    /// Full URL of the verify endpoint
    pub fn verify_url(&self) -> String {
        join_url(&self.base_url, &self.verify_path)
    }

    /// Full URL of the resend endpoint
    pub fn resend_url(&self) -> String {
        join_url(&self.base_url, &self.resend_path)
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Timings of the verification screen
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Seconds the resend action stays locked after activation or a resend
    pub resend_cooldown_seconds: u32,

    /// Cooldown tick period in milliseconds
    pub tick_interval_ms: u64,

    /// Auto-dismiss delay of status alerts in milliseconds
    pub alert_dismiss_ms: u64,

    /// Delay between a successful verification and navigation, in milliseconds
    pub redirect_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_seconds: 60,
            tick_interval_ms: 1_000,
            alert_dismiss_ms: 5_000,
            redirect_delay_ms: 1_500,
        }
    }
}

impl TimingConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn alert_dismiss(&self) -> Duration {
        Duration::from_millis(self.alert_dismiss_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

/// User-facing texts shown by the verification screen
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MessagesConfig {
    pub verify_success: String,
    pub verify_failure_default: String,
    pub resend_success: String,
    pub resend_failure_default: String,
    pub identity_unresolved: String,
    pub session_save_failure: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            verify_success: "Email verified successfully! Redirecting...".to_string(),
            verify_failure_default: "Invalid OTP. Please try again.".to_string(),
            resend_success: "A new verification code has been sent to your email.".to_string(),
            resend_failure_default: "Failed to resend OTP. Please try again.".to_string(),
            identity_unresolved:
                "We couldn't determine which email to verify. Please register or log in again."
                    .to_string(),
            session_save_failure:
                "Your email was verified but the session could not be saved. Please log in."
                    .to_string(),
        }
    }
}

/// Complete verification flow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Backend endpoints
    #[serde(default)]
    pub api: ApiConfig,

    /// Flow timings
    #[serde(default)]
    pub timing: TimingConfig,

    /// User-facing messages
    #[serde(default)]
    pub messages: MessagesConfig,

    /// Route navigated to after a successful verification
    #[serde(default = "default_success_destination")]
    pub success_destination: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            timing: TimingConfig::default(),
            messages: MessagesConfig::default(),
            success_destination: default_success_destination(),
        }
    }
}

impl VerificationConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            success_destination: env::var("OTP_SUCCESS_DESTINATION")
                .unwrap_or_else(|_| default_success_destination()),
            ..Default::default()
        }
    }
}

fn default_verify_path() -> String {
    String::from("/api/user/verify-otp")
}

fn default_resend_path() -> String {
    String::from("/api/user/resend-otp")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_success_destination() -> String {
    String::from("/dashboard")
}
