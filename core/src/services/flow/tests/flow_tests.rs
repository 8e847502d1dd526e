//! Unit tests for the verification flow
//!
//! Runs on a paused clock; sleeps are offset by half a second so they never
//! land on the same instant as a cooldown tick.

use std::sync::Arc;
use std::time::Duration;

use otp_shared::VerificationConfig;

use crate::domain::entities::alert::AlertKind;
use crate::domain::entities::cooldown::CooldownPhase;
use crate::domain::entities::submission::{ResendOutcome, SubmissionState};
use crate::errors::{ApiError, DomainError, ValidationError, VerificationError};
use crate::repositories::{InMemorySessionStore, SessionStore, PENDING_IDENTITY_KEY};
use crate::services::code_entry::tests::RecordingFocus;
use crate::services::flow::VerificationFlow;
use crate::services::identity::IdentitySource;
use crate::services::verification::tests::mocks::{MockVerificationApi, RecordingNavigator};

type Flow = VerificationFlow<MockVerificationApi, InMemorySessionStore>;

struct Screen {
    api: Arc<MockVerificationApi>,
    store: Arc<InMemorySessionStore>,
    navigator: Arc<RecordingNavigator>,
    focus: Arc<RecordingFocus>,
    flow: Flow,
}

fn screen_with(api: MockVerificationApi, store: InMemorySessionStore) -> Screen {
    let api = Arc::new(api);
    let store = Arc::new(store);
    let navigator = Arc::new(RecordingNavigator::default());
    let focus = Arc::new(RecordingFocus::default());

    let flow = VerificationFlow::new(
        Arc::clone(&api),
        Arc::clone(&store),
        navigator.clone(),
        focus.clone(),
        &VerificationConfig::default(),
    );

    Screen {
        api,
        store,
        navigator,
        focus,
        flow,
    }
}

fn screen(api: MockVerificationApi) -> Screen {
    screen_with(
        api,
        InMemorySessionStore::with_entries([(PENDING_IDENTITY_KEY, "a@b.com")]),
    )
}

fn type_code(flow: &Flow, code: &str) {
    for (index, digit) in code.chars().enumerate() {
        flow.set_digit(index, &digit.to_string()).unwrap();
    }
}

async fn elapse_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn test_unresolved_identity_disables_everything() {
    let s = screen_with(MockVerificationApi::new(), InMemorySessionStore::new());

    assert!(s.flow.activate(None).await.is_none());

    let view = s.flow.snapshot();
    assert_eq!(view.identity, "");
    assert!(!view.controls_enabled);
    assert!(!view.can_submit);
    assert_eq!(
        view.inline_notice.as_deref(),
        Some("We couldn't determine which email to verify. Please register or log in again.")
    );
    assert!(view.alert.is_none());

    let unresolved = DomainError::Verification(VerificationError::IdentityUnresolved);
    assert_eq!(s.flow.set_digit(0, "1").unwrap_err(), unresolved);
    assert_eq!(s.flow.paste("123456").unwrap_err(), unresolved);
    assert_eq!(s.flow.backspace(0).unwrap_err(), unresolved);
    assert_eq!(s.flow.submit().await.unwrap_err(), unresolved);
    assert_eq!(s.flow.resend().await.unwrap_err(), unresolved);
    assert_eq!(s.api.verify_count() + s.api.resend_count(), 0);

    // Cooldown is not ticking
    elapse_ms(5_500).await;
    assert_eq!(s.flow.cooldown().phase(), CooldownPhase::Counting(60));
}

#[tokio::test(start_paused = true)]
async fn test_handoff_activation_starts_cooldown() {
    let s = screen_with(MockVerificationApi::new(), InMemorySessionStore::new());

    let resolved = s.flow.activate(Some("new@user.com")).await.unwrap();

    assert_eq!(resolved.source, IdentitySource::Handoff);
    assert_eq!(s.flow.identity(), "new@user.com");
    assert!(s.flow.controls_enabled());
    assert_eq!(
        s.store.get_pending_identity().await.unwrap().as_deref(),
        Some("new@user.com")
    );

    elapse_ms(2_500).await;
    assert_eq!(s.flow.cooldown().phase(), CooldownPhase::Counting(58));
    assert_eq!(s.flow.snapshot().inline_notice, None);
}

#[tokio::test(start_paused = true)]
async fn test_typing_chains_focus_and_enables_submit() {
    let s = screen(MockVerificationApi::new());
    s.flow.activate(None).await.unwrap();

    type_code(&s.flow, "12345");
    assert!(!s.flow.can_submit());
    assert_eq!(s.focus.last(), Some(5));

    s.flow.set_digit(5, "6").unwrap();
    assert!(s.flow.can_submit());
    // The last slot does not advance focus
    assert_eq!(s.focus.count(), 5);

    s.flow.backspace(5).unwrap();
    assert!(!s.flow.can_submit());
    assert_eq!(s.flow.snapshot().slots[5], "");
}

#[tokio::test(start_paused = true)]
async fn test_submit_success_scenario() {
    let s = screen(MockVerificationApi::new());
    s.flow.activate(None).await.unwrap();
    assert!(s.flow.paste("123456").unwrap());
    assert_eq!(s.focus.last(), Some(5));

    let outcome = s.flow.submit().await.unwrap();

    assert_eq!(outcome, SubmissionState::Succeeded);
    assert_eq!(
        s.api.verify_calls.lock().unwrap().as_slice(),
        &[("a@b.com".to_string(), "123456".to_string())]
    );
    let entries = s.store.snapshot().await;
    assert_eq!(entries.get("sessionToken").map(String::as_str), Some("abc"));
    assert!(entries.contains_key("sessionProfile"));
    assert!(!entries.contains_key(PENDING_IDENTITY_KEY));

    let view = s.flow.snapshot();
    assert_eq!(view.alert.unwrap().kind, AlertKind::Success);
    assert!(!view.can_submit);

    elapse_ms(1_600).await;
    assert_eq!(s.navigator.visited(), vec!["/dashboard".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_submit_failure_keeps_code_for_retry() {
    let s = screen(MockVerificationApi::new().with_verify_result(Err(ApiError::Rejected {
        status: 400,
        message: Some("Invalid OTP. Please try again.".to_string()),
    })));
    s.flow.activate(None).await.unwrap();
    type_code(&s.flow, "123456");

    let outcome = s.flow.submit().await.unwrap();

    assert_eq!(outcome.failure_message(), Some("Invalid OTP. Please try again."));
    let view = s.flow.snapshot();
    assert_eq!(view.slots, ["1", "2", "3", "4", "5", "6"].map(String::from));
    assert_eq!(view.submission, SubmissionState::Idle);
    assert!(view.can_submit);
    assert_eq!(view.alert.unwrap().message, "Invalid OTP. Please try again.");

    // Alert auto-dismisses
    elapse_ms(5_100).await;
    assert!(s.flow.alert().is_none());
}

#[tokio::test]
async fn test_incomplete_code_never_reaches_network() {
    let s = screen(MockVerificationApi::new());
    s.flow.activate(None).await.unwrap();
    type_code(&s.flow, "123");

    let err = s.flow.submit().await.unwrap_err();

    assert_eq!(
        err,
        DomainError::Validation(ValidationError::InvalidLength {
            expected: 6,
            actual: 3
        })
    );
    assert_eq!(s.api.verify_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_resend_during_cooldown_changes_nothing() {
    let s = screen(MockVerificationApi::new());
    s.flow.activate(None).await.unwrap();
    type_code(&s.flow, "12");
    elapse_ms(10_500).await;

    let before = s.flow.snapshot();
    let err = s.flow.resend().await.unwrap_err();

    assert_eq!(
        err,
        DomainError::Verification(VerificationError::CooldownActive {
            seconds_remaining: 50
        })
    );
    let after = s.flow.snapshot();
    assert_eq!(after.cooldown, before.cooldown);
    assert_eq!(after.slots, before.slots);
    assert_eq!(s.api.resend_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_resend_after_cooldown_restarts_it() {
    let s = screen(MockVerificationApi::new());
    s.flow.activate(None).await.unwrap();
    type_code(&s.flow, "9876");

    elapse_ms(60_500).await;
    assert_eq!(s.flow.cooldown().phase(), CooldownPhase::Ready);

    let outcome = s.flow.resend().await.unwrap();

    assert_eq!(outcome, ResendOutcome::Sent);
    let view = s.flow.snapshot();
    assert_eq!(view.cooldown.phase(), CooldownPhase::Counting(60));
    assert!(view.slots.iter().all(String::is_empty));
    assert_eq!(view.alert.unwrap().kind, AlertKind::Success);

    elapse_ms(1_500).await;
    assert_eq!(s.flow.cooldown().phase(), CooldownPhase::Counting(59));
}

#[tokio::test(start_paused = true)]
async fn test_teardown_discards_late_response() {
    let s = screen(MockVerificationApi::new().with_latency(Duration::from_secs(2)));
    s.flow.activate(None).await.unwrap();
    type_code(&s.flow, "123456");

    let (outcome, _) = tokio::join!(s.flow.submit(), async {
        elapse_ms(500).await;
        s.flow.teardown();
    });

    assert_eq!(
        outcome.unwrap_err(),
        DomainError::Verification(VerificationError::FlowEnded)
    );
    assert_eq!(s.store.get_session_token().await.unwrap(), None);
    assert!(s.flow.alert().is_none());

    let cooldown = s.flow.cooldown();
    elapse_ms(5_000).await;
    assert_eq!(s.flow.cooldown(), cooldown);
    assert!(s.navigator.visited().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_reactivation_starts_fresh() {
    let s = screen(MockVerificationApi::new().with_verify_result(Err(ApiError::Transport(
        "timeout".to_string(),
    ))));
    s.flow.activate(None).await.unwrap();
    type_code(&s.flow, "123456");
    s.flow.submit().await.unwrap();
    elapse_ms(20_500).await;

    s.flow.activate(None).await.unwrap();

    let view = s.flow.snapshot();
    assert!(view.slots.iter().all(String::is_empty));
    assert!(view.alert.is_none());
    assert_eq!(view.cooldown.phase(), CooldownPhase::Counting(60));
    assert_eq!(view.submission, SubmissionState::Idle);
}

#[tokio::test]
async fn test_snapshot_serializes_for_widgets() {
    let s = screen(MockVerificationApi::new());
    s.flow.activate(None).await.unwrap();
    s.flow.set_digit(0, "4").unwrap();

    let json = serde_json::to_value(s.flow.snapshot()).unwrap();

    assert_eq!(json["identity"], "a@b.com");
    assert_eq!(json["slots"][0], "4");
    assert_eq!(json["slots"][1], "");
    assert_eq!(json["controls_enabled"], true);
    assert_eq!(json["cooldown"]["seconds_remaining"], 60);
    assert_eq!(json["submission"]["state"], "idle");
    assert!(json.get("inline_notice").is_none());
}
