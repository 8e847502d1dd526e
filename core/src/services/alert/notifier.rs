//! Alert holder with a single pending auto-dismiss

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::entities::alert::{AlertKind, AlertState};

/// Holds at most one alert and clears it after `dismiss_after`
///
/// Showing a new alert replaces the old one and cancels its timer; the
/// timer task additionally only clears the alert it was started for.
pub struct AlertNotifier {
    current: Arc<watch::Sender<Option<AlertState>>>,
    pending_dismiss: Mutex<Option<JoinHandle<()>>>,
    dismiss_after: Duration,
}

impl AlertNotifier {
    pub fn new(dismiss_after: Duration) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            current: Arc::new(current),
            pending_dismiss: Mutex::new(None),
            dismiss_after,
        }
    }

    /// Replace the current alert and restart the auto-dismiss timer
    ///
    /// Must be called from within a Tokio runtime.
    pub fn show(&self, kind: AlertKind, message: impl Into<String>) -> AlertState {
        let alert = AlertState::new(kind, message);
        self.cancel_pending();

        tracing::debug!(kind = ?alert.kind, message = %alert.message, "Showing alert");
        self.current.send_replace(Some(alert.clone()));

        let current = Arc::clone(&self.current);
        let id = alert.id;
        let delay = self.dismiss_after;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            current.send_if_modified(|slot| {
                if slot.as_ref().is_some_and(|live| live.id == id) {
                    *slot = None;
                    true
                } else {
                    false
                }
            });
        });
        *self.pending_slot() = Some(handle);

        alert
    }

    pub fn success(&self, message: impl Into<String>) -> AlertState {
        self.show(AlertKind::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> AlertState {
        self.show(AlertKind::Error, message)
    }

    /// Currently displayed alert
    pub fn current(&self) -> Option<AlertState> {
        self.current.borrow().clone()
    }

    /// Receiver notified whenever the alert changes
    pub fn subscribe(&self) -> watch::Receiver<Option<AlertState>> {
        self.current.subscribe()
    }

    /// Close the alert now
    pub fn dismiss(&self) {
        self.cancel_pending();
        self.current.send_replace(None);
    }

    /// Cancel the pending auto-dismiss, leaving the current alert in place
    pub fn shutdown(&self) {
        self.cancel_pending();
    }

    fn cancel_pending(&self) {
        if let Some(handle) = self.pending_slot().take() {
            handle.abort();
        }
    }

    fn pending_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending_dismiss
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for AlertNotifier {
    fn drop(&mut self) {
        self.shutdown();
    }
}
