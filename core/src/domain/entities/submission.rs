//! Request lifecycle states.

use serde::{Deserialize, Serialize};

/// Lifecycle of the verify request
///
/// The stored state is only ever `Idle`, `Submitting` or `Succeeded`; a
/// rejected attempt is reported as `Failed` to the caller while the stored
/// state settles back to `Idle` so the user can retry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SubmissionState::Idle)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, SubmissionState::Succeeded)
    }

    /// Failure message of a rejected attempt
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Result of a dispatched resend request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResendOutcome {
    /// A new code is on its way; cooldown restarted
    Sent,
    /// The request failed with this alert text; cooldown untouched
    Failed(String),
}
