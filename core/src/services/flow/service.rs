//! Activation-scoped verification flow

use std::sync::{Arc, Mutex, MutexGuard};

use otp_shared::validation::mask_email;
use otp_shared::{MessagesConfig, VerificationConfig};
use tokio::sync::watch;

use crate::domain::entities::alert::AlertState;
use crate::domain::entities::cooldown::CooldownState;
use crate::domain::entities::submission::{ResendOutcome, SubmissionState};
use crate::errors::{DomainResult, VerificationError};
use crate::repositories::SessionStore;
use crate::services::alert::AlertNotifier;
use crate::services::code_entry::{CodeEntryController, SlotFocus};
use crate::services::cooldown::ResendCooldownTimer;
use crate::services::identity::{IdentityResolver, ResolvedIdentity};
use crate::services::verification::{
    Navigator, SubmitterConfig, VerificationApiTrait, VerificationSubmitter,
};

use super::snapshot::FlowSnapshot;

/// The verification screen
///
/// Input is accepted only after [`activate`](Self::activate) resolved an
/// identity. [`teardown`](Self::teardown) stops every timer and discards any
/// response still in flight.
pub struct VerificationFlow<A: VerificationApiTrait, S: SessionStore> {
    resolver: IdentityResolver<S>,
    submitter: VerificationSubmitter<A, S>,
    alerts: Arc<AlertNotifier>,
    cooldown: Arc<ResendCooldownTimer>,
    code_entry: Arc<Mutex<CodeEntryController>>,
    identity: Mutex<Option<ResolvedIdentity>>,
    messages: MessagesConfig,
}

impl<A: VerificationApiTrait, S: SessionStore> VerificationFlow<A, S> {
    pub fn new(
        api: Arc<A>,
        store: Arc<S>,
        navigator: Arc<dyn Navigator>,
        focus: Arc<dyn SlotFocus>,
        config: &VerificationConfig,
    ) -> Self {
        let alerts = Arc::new(AlertNotifier::new(config.timing.alert_dismiss()));
        let cooldown = Arc::new(ResendCooldownTimer::from_config(&config.timing));
        let code_entry = Arc::new(Mutex::new(CodeEntryController::new(focus)));

        let submitter = VerificationSubmitter::new(
            api,
            Arc::clone(&store),
            Arc::clone(&alerts),
            Arc::clone(&cooldown),
            Arc::clone(&code_entry),
            navigator,
            SubmitterConfig::from(config),
        );

        Self {
            resolver: IdentityResolver::new(store),
            submitter,
            alerts,
            cooldown,
            code_entry,
            identity: Mutex::new(None),
            messages: config.messages.clone(),
        }
    }

    /// Open the screen
    ///
    /// Any state from a previous activation is discarded. The cooldown only
    /// starts when an identity was resolved.
    pub async fn activate(&self, handoff: Option<&str>) -> Option<ResolvedIdentity> {
        self.submitter.reset();
        self.cooldown.cancel();
        self.alerts.dismiss();
        self.lock_code_entry().clear();
        *self.identity_slot() = None;

        let resolved = self.resolver.resolve_with_source(handoff).await;
        match &resolved {
            Some(identity) => {
                tracing::info!(
                    email = %mask_email(&identity.email),
                    source = identity.source.as_str(),
                    "Verification screen activated"
                );
                self.cooldown.start();
            }
            None => tracing::warn!("Verification screen activated without an identity"),
        }

        *self.identity_slot() = resolved.clone();
        resolved
    }

    /// Email being verified, `""` when unresolved
    pub fn identity(&self) -> String {
        self.identity_slot()
            .as_ref()
            .map(|resolved| resolved.email.clone())
            .unwrap_or_default()
    }

    /// Whether the code entry and actions accept input
    pub fn controls_enabled(&self) -> bool {
        self.identity_slot().is_some()
    }

    pub fn set_digit(&self, index: usize, value: &str) -> DomainResult<()> {
        self.ensure_enabled()?;
        self.lock_code_entry().set_digit(index, value)?;
        Ok(())
    }

    pub fn backspace(&self, index: usize) -> DomainResult<()> {
        self.ensure_enabled()?;
        self.lock_code_entry().handle_backspace(index)?;
        Ok(())
    }

    /// Apply pasted text; returns whether it replaced the code
    pub fn paste(&self, text: &str) -> DomainResult<bool> {
        self.ensure_enabled()?;
        Ok(self.lock_code_entry().handle_paste(text))
    }

    /// Identity resolved, all six digits present and nothing in flight
    pub fn can_submit(&self) -> bool {
        self.controls_enabled()
            && self.lock_code_entry().is_complete()
            && self.submitter.state().is_idle()
    }

    /// Verify the entered code
    pub async fn submit(&self) -> DomainResult<SubmissionState> {
        let identity = self.require_identity()?;
        let code = self.lock_code_entry().validated_code()?;
        self.submitter.verify(&identity, &code).await
    }

    /// Request a new code
    pub async fn resend(&self) -> DomainResult<ResendOutcome> {
        let identity = self.require_identity()?;
        self.submitter.resend(&identity).await
    }

    pub fn dismiss_alert(&self) {
        self.alerts.dismiss();
    }

    pub fn submission(&self) -> SubmissionState {
        self.submitter.state()
    }

    pub fn cooldown(&self) -> CooldownState {
        self.cooldown.state()
    }

    pub fn alert(&self) -> Option<AlertState> {
        self.alerts.current()
    }

    /// Receiver notified on every cooldown tick
    pub fn subscribe_cooldown(&self) -> watch::Receiver<CooldownState> {
        self.cooldown.subscribe()
    }

    /// Receiver notified whenever the alert changes
    pub fn subscribe_alert(&self) -> watch::Receiver<Option<AlertState>> {
        self.alerts.subscribe()
    }

    /// Current view of the screen
    pub fn snapshot(&self) -> FlowSnapshot {
        let identity = self.identity();
        let controls_enabled = !identity.is_empty();
        let slots = self.lock_code_entry().slots().display_values();

        FlowSnapshot {
            inline_notice: (!controls_enabled)
                .then(|| self.messages.identity_unresolved.clone()),
            identity,
            slots,
            controls_enabled,
            can_submit: self.can_submit(),
            cooldown: self.cooldown.state(),
            alert: self.alerts.current(),
            submission: self.submitter.state(),
        }
    }

    /// Close the screen: stop timers and ignore any late response
    pub fn teardown(&self) {
        self.submitter.cancel();
        self.cooldown.cancel();
        self.alerts.dismiss();
        tracing::debug!("Verification screen torn down");
    }

    fn ensure_enabled(&self) -> Result<(), VerificationError> {
        if self.controls_enabled() {
            Ok(())
        } else {
            Err(VerificationError::IdentityUnresolved)
        }
    }

    fn require_identity(&self) -> Result<String, VerificationError> {
        self.identity_slot()
            .as_ref()
            .map(|resolved| resolved.email.clone())
            .ok_or(VerificationError::IdentityUnresolved)
    }

    fn lock_code_entry(&self) -> MutexGuard<'_, CodeEntryController> {
        self.code_entry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn identity_slot(&self) -> MutexGuard<'_, Option<ResolvedIdentity>> {
        self.identity
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<A: VerificationApiTrait, S: SessionStore> Drop for VerificationFlow<A, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
