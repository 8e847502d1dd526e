//! Resend cooldown state.

use serde::{Deserialize, Serialize};

/// Seconds the resend action stays locked by default
pub const DEFAULT_COOLDOWN_SECONDS: u32 = 60;

/// Phase of the resend cooldown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownPhase {
    /// Counting down; resend is locked
    Counting(u32),
    /// Countdown finished; resend is allowed
    Ready,
}

/// Snapshot of the resend cooldown
///
/// `can_resend` is derived from `seconds_remaining` and is true iff it is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownState {
    seconds_remaining: u32,
    can_resend: bool,
}

impl CooldownState {
    /// Start counting from `seconds`; zero means immediately ready
    pub fn counting(seconds: u32) -> Self {
        Self {
            seconds_remaining: seconds,
            can_resend: seconds == 0,
        }
    }

    /// Resend allowed
    pub fn ready() -> Self {
        Self::counting(0)
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn can_resend(&self) -> bool {
        self.can_resend
    }

    pub fn phase(&self) -> CooldownPhase {
        if self.can_resend {
            CooldownPhase::Ready
        } else {
            CooldownPhase::Counting(self.seconds_remaining)
        }
    }

    /// State after one tick; a ready state stays ready
    pub fn ticked(self) -> Self {
        Self::counting(self.seconds_remaining.saturating_sub(1))
    }
}

impl Default for CooldownState {
    fn default() -> Self {
        Self::counting(DEFAULT_COOLDOWN_SECONDS)
    }
}
