//! Countdown timer gating the resend action

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use otp_shared::TimingConfig;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use crate::domain::entities::cooldown::CooldownState;
use crate::errors::VerificationError;

/// Resend cooldown: `Counting(n)` ticking down once per period, then `Ready`
///
/// At most one tick task is alive at a time. Each task is tagged with the
/// generation it was started in and stops as soon as a newer generation
/// exists, so a superseded task can never touch the state.
pub struct ResendCooldownTimer {
    state: Arc<watch::Sender<CooldownState>>,
    generation: Arc<AtomicU64>,
    task: Mutex<Option<JoinHandle<()>>>,
    cooldown_seconds: u32,
    tick_interval: Duration,
}

impl ResendCooldownTimer {
    /// Create an idle timer showing `Counting(cooldown_seconds)`; call [`start`](Self::start) to tick
    pub fn new(cooldown_seconds: u32, tick_interval: Duration) -> Self {
        let (state, _) = watch::channel(CooldownState::counting(cooldown_seconds));
        Self {
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            task: Mutex::new(None),
            cooldown_seconds,
            tick_interval,
        }
    }

    pub fn from_config(timing: &TimingConfig) -> Self {
        Self::new(timing.resend_cooldown_seconds, timing.tick_interval())
    }

    /// Current cooldown state
    pub fn state(&self) -> CooldownState {
        *self.state.borrow()
    }

    pub fn can_resend(&self) -> bool {
        self.state().can_resend()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<CooldownState> {
        self.state.subscribe()
    }

    /// Enter `Counting(cooldown_seconds)` and start ticking
    ///
    /// Any previous tick task is cancelled first. Must be called from within
    /// a Tokio runtime.
    pub fn start(&self) {
        let generation = self.cancel();
        self.state
            .send_replace(CooldownState::counting(self.cooldown_seconds));

        if self.cooldown_seconds == 0 {
            return;
        }

        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        let period = self.tick_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if current.load(Ordering::SeqCst) != generation {
                    break;
                }
                if apply_tick(&state).can_resend() {
                    tracing::debug!(event = "resend_cooldown_elapsed", "Resend is now available");
                    break;
                }
            }
        });

        *self.task_slot() = Some(handle);
    }

    /// Resend was performed; only valid once the countdown reached zero
    pub fn resend_triggered(&self) -> Result<(), VerificationError> {
        let state = self.state();
        if !state.can_resend() {
            return Err(VerificationError::CooldownActive {
                seconds_remaining: state.seconds_remaining(),
            });
        }
        self.start();
        Ok(())
    }

    /// Advance the countdown by one second by hand
    pub fn tick(&self) -> CooldownState {
        apply_tick(&self.state)
    }

    /// Stop ticking, keeping the current state; returns the new generation
    pub fn cancel(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(handle) = self.task_slot().take() {
            handle.abort();
        }
        generation
    }

    fn task_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.task.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for ResendCooldownTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn apply_tick(state: &watch::Sender<CooldownState>) -> CooldownState {
    let mut after = CooldownState::ready();
    state.send_modify(|s| {
        *s = s.ticked();
        after = *s;
    });
    after
}
