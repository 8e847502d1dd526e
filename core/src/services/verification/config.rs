//! Configuration for the verification submitter

use std::time::Duration;

use otp_shared::{MessagesConfig, VerificationConfig};

/// Settings the submitter needs from the full flow configuration
#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    /// Delay between a successful verification and navigation
    pub redirect_delay: Duration,
    /// Route navigated to after a successful verification
    pub success_destination: String,
    /// User-facing alert texts
    pub messages: MessagesConfig,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self::from(&VerificationConfig::default())
    }
}

impl From<&VerificationConfig> for SubmitterConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            redirect_delay: config.timing.redirect_delay(),
            success_destination: config.success_destination.clone(),
            messages: config.messages.clone(),
        }
    }
}
