//! Verify and resend request handling

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use otp_shared::validation::{mask_email, validators, CODE_LENGTH};
use tokio::task::JoinHandle;

use crate::domain::entities::session::SessionRecord;
use crate::domain::entities::submission::{ResendOutcome, SubmissionState};
use crate::errors::{ApiError, DomainResult, ValidationError, VerificationError};
use crate::repositories::SessionStore;
use crate::services::alert::AlertNotifier;
use crate::services::code_entry::CodeEntryController;
use crate::services::cooldown::ResendCooldownTimer;

use super::config::SubmitterConfig;
use super::traits::{Navigator, VerificationApiTrait};

/// Sends verify and resend requests and applies their outcome
///
/// At most one request is in flight at a time. Every request is tagged with
/// the epoch it started in; [`cancel`](Self::cancel) bumps the epoch so a
/// response arriving afterwards is discarded without touching any state.
pub struct VerificationSubmitter<A: VerificationApiTrait, S: SessionStore> {
    api: Arc<A>,
    store: Arc<S>,
    alerts: Arc<AlertNotifier>,
    cooldown: Arc<ResendCooldownTimer>,
    code_entry: Arc<Mutex<CodeEntryController>>,
    navigator: Arc<dyn Navigator>,
    config: SubmitterConfig,
    state: Mutex<SubmissionState>,
    epoch: Arc<AtomicU64>,
    navigation: Mutex<Option<JoinHandle<()>>>,
}

impl<A: VerificationApiTrait, S: SessionStore> VerificationSubmitter<A, S> {
    pub fn new(
        api: Arc<A>,
        store: Arc<S>,
        alerts: Arc<AlertNotifier>,
        cooldown: Arc<ResendCooldownTimer>,
        code_entry: Arc<Mutex<CodeEntryController>>,
        navigator: Arc<dyn Navigator>,
        config: SubmitterConfig,
    ) -> Self {
        Self {
            api,
            store,
            alerts,
            cooldown,
            code_entry,
            navigator,
            config,
            state: Mutex::new(SubmissionState::Idle),
            epoch: Arc::new(AtomicU64::new(0)),
            navigation: Mutex::new(None),
        }
    }

    /// Current request state
    pub fn state(&self) -> SubmissionState {
        self.state_slot().clone()
    }

    /// True while a verify or resend request is in flight
    pub fn is_busy(&self) -> bool {
        self.state_slot().is_submitting()
    }

    /// Submit `code` for `identity`
    ///
    /// Local problems (no identity, malformed code, a request already in
    /// flight, an already verified flow) are returned as errors and nothing
    /// is sent. A rejected or failed request is reported as
    /// `Ok(SubmissionState::Failed(message))` with the stored state back at
    /// `Idle` so the user can retry.
    pub async fn verify(&self, identity: &str, code: &str) -> DomainResult<SubmissionState> {
        let identity = require_identity(identity)?;
        validate_code(code)?;

        let started = self.begin()?;
        let mut in_flight = InFlight::new(self, started);

        tracing::info!(email = %mask_email(identity), "Submitting verification code");
        let response = self.api.verify_otp(identity, code).await;
        self.ensure_current(started)?;

        let outcome = match response {
            Ok(session) => self.complete_verification(identity, session, started).await?,
            Err(e) => {
                let message = e.user_message(&self.config.messages.verify_failure_default);
                log_api_failure(identity, &e, "otp_verification_failed");
                self.alerts.error(message.clone());
                self.settle(SubmissionState::Idle);
                SubmissionState::Failed(message)
            }
        };

        in_flight.settled();
        Ok(outcome)
    }

    /// Request a new code for `identity`
    ///
    /// Refused with `CooldownActive` while the cooldown is counting. On
    /// success the cooldown restarts and the code slots are cleared; on
    /// failure the cooldown is left as it was.
    pub async fn resend(&self, identity: &str) -> DomainResult<ResendOutcome> {
        let identity = require_identity(identity)?;
        if self.state_slot().is_succeeded() {
            return Err(VerificationError::AlreadyVerified.into());
        }

        let cooldown = self.cooldown.state();
        if !cooldown.can_resend() {
            return Err(VerificationError::CooldownActive {
                seconds_remaining: cooldown.seconds_remaining(),
            }
            .into());
        }

        let started = self.begin()?;
        let mut in_flight = InFlight::new(self, started);

        tracing::info!(email = %mask_email(identity), "Requesting a new verification code");
        let response = self.api.resend_otp(identity).await;
        self.ensure_current(started)?;

        let outcome = match response {
            Ok(server_message) => {
                if let Err(e) = self.cooldown.resend_triggered() {
                    tracing::warn!(error = %e, "Resend cooldown was restarted while the request was in flight");
                }
                self.lock_code_entry().clear();

                let message = server_message
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| self.config.messages.resend_success.clone());
                self.alerts.success(message);

                tracing::info!(
                    email = %mask_email(identity),
                    event = "otp_resent",
                    "New verification code requested"
                );
                ResendOutcome::Sent
            }
            Err(e) => {
                let message = e.user_message(&self.config.messages.resend_failure_default);
                log_api_failure(identity, &e, "otp_resend_failed");
                self.alerts.error(message.clone());
                ResendOutcome::Failed(message)
            }
        };

        self.settle(SubmissionState::Idle);
        in_flight.settled();
        Ok(outcome)
    }

    /// Cancel everything and return to `Idle`, forgetting a previous success
    pub fn reset(&self) {
        self.cancel();
        self.settle(SubmissionState::Idle);
    }

    /// Discard any in-flight response and any scheduled navigation
    pub fn cancel(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.navigation_slot().take() {
            handle.abort();
        }

        let mut state = self.state_slot();
        if state.is_submitting() {
            *state = SubmissionState::Idle;
        }
    }

    async fn complete_verification(
        &self,
        identity: &str,
        session: SessionRecord,
        started: u64,
    ) -> DomainResult<SubmissionState> {
        if let Err(e) = self.persist_session(&session, started).await {
            self.ensure_current(started)?;
            tracing::error!(
                email = %mask_email(identity),
                error = %e,
                event = "session_save_failed",
                "Verification succeeded but the session could not be stored"
            );
            let message = self.config.messages.session_save_failure.clone();
            self.alerts.error(message.clone());
            self.settle(SubmissionState::Idle);
            return Ok(SubmissionState::Failed(message));
        }

        if let Err(e) = self.store.clear_pending_identity().await {
            tracing::warn!(error = %e, "Failed to clear pending identity marker");
        }
        self.ensure_current(started)?;

        tracing::info!(
            email = %mask_email(identity),
            event = "otp_verified_success",
            "Email verified successfully"
        );

        self.alerts.success(self.config.messages.verify_success.clone());
        self.settle(SubmissionState::Succeeded);
        self.schedule_navigation(started);

        Ok(SubmissionState::Succeeded)
    }

    /// Write token then profile, stopping at the first write that finds the
    /// request superseded
    ///
    /// A cancelled request leaves the pending marker alone, so the flow that
    /// replaced it keeps its identity.
    async fn persist_session(&self, session: &SessionRecord, started: u64) -> DomainResult<()> {
        self.store.set_session_token(&session.token).await?;
        self.ensure_current(started)?;
        self.store.set_session_profile(&session.profile).await?;
        self.ensure_current(started)?;
        Ok(())
    }

    fn schedule_navigation(&self, started: u64) {
        let epoch = Arc::clone(&self.epoch);
        let navigator = Arc::clone(&self.navigator);
        let destination = self.config.success_destination.clone();
        let delay = self.config.redirect_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if epoch.load(Ordering::SeqCst) == started {
                tracing::debug!(destination = %destination, "Navigating after verification");
                navigator.navigate(&destination);
            }
        });

        if let Some(previous) = self.navigation_slot().replace(handle) {
            previous.abort();
        }
    }

    /// Claim the in-flight slot, returning the epoch the request runs in
    fn begin(&self) -> Result<u64, VerificationError> {
        let mut state = self.state_slot();
        match *state {
            SubmissionState::Submitting => Err(VerificationError::SubmissionInProgress),
            SubmissionState::Succeeded => Err(VerificationError::AlreadyVerified),
            SubmissionState::Idle | SubmissionState::Failed(_) => {
                *state = SubmissionState::Submitting;
                Ok(self.epoch.load(Ordering::SeqCst))
            }
        }
    }

    fn ensure_current(&self, started: u64) -> Result<(), VerificationError> {
        if self.epoch.load(Ordering::SeqCst) != started {
            tracing::debug!("Discarding response that arrived after teardown");
            return Err(VerificationError::FlowEnded);
        }
        Ok(())
    }

    fn settle(&self, next: SubmissionState) {
        *self.state_slot() = next;
    }

    fn lock_code_entry(&self) -> MutexGuard<'_, CodeEntryController> {
        self.code_entry
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn state_slot(&self) -> MutexGuard<'_, SubmissionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn navigation_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.navigation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<A: VerificationApiTrait, S: SessionStore> Drop for VerificationSubmitter<A, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.navigation_slot().take() {
            handle.abort();
        }
    }
}

/// Releases the in-flight slot if a request future is dropped before it settles
struct InFlight<'a, A: VerificationApiTrait, S: SessionStore> {
    submitter: &'a VerificationSubmitter<A, S>,
    started: u64,
    settled: bool,
}

impl<'a, A: VerificationApiTrait, S: SessionStore> InFlight<'a, A, S> {
    fn new(submitter: &'a VerificationSubmitter<A, S>, started: u64) -> Self {
        Self {
            submitter,
            started,
            settled: false,
        }
    }

    fn settled(&mut self) {
        self.settled = true;
    }
}

impl<A: VerificationApiTrait, S: SessionStore> Drop for InFlight<'_, A, S> {
    fn drop(&mut self) {
        if self.settled || self.submitter.epoch.load(Ordering::SeqCst) != self.started {
            return;
        }
        let mut state = self.submitter.state_slot();
        if state.is_submitting() {
            *state = SubmissionState::Idle;
        }
    }
}

fn require_identity(identity: &str) -> Result<&str, VerificationError> {
    let identity = identity.trim();
    if identity.is_empty() {
        return Err(VerificationError::IdentityUnresolved);
    }
    Ok(identity)
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    if validators::is_verification_code(code) {
        return Ok(());
    }
    let length = code.chars().count();
    if length != CODE_LENGTH {
        return Err(ValidationError::InvalidLength {
            expected: CODE_LENGTH,
            actual: length,
        });
    }
    Err(ValidationError::NonNumeric)
}

fn log_api_failure(identity: &str, error: &ApiError, event: &'static str) {
    match error {
        ApiError::Rejected { status, .. } => tracing::warn!(
            email = %mask_email(identity),
            status = *status,
            event = event,
            "Request rejected by the verification API"
        ),
        ApiError::Transport(reason) => tracing::warn!(
            email = %mask_email(identity),
            error = %reason,
            event = event,
            "Verification API unreachable"
        ),
    }
}
