//! Unit tests for the resend cooldown timer
//!
//! Timer tests run on a paused clock; sleeps are offset by half a period so
//! they never land on the same instant as a tick.

use std::time::Duration;

use crate::domain::entities::cooldown::{CooldownPhase, CooldownState};
use crate::errors::VerificationError;
use crate::services::cooldown::ResendCooldownTimer;

fn timer() -> ResendCooldownTimer {
    ResendCooldownTimer::new(60, Duration::from_secs(1))
}

async fn elapse_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[test]
fn test_manual_ticks_reach_ready_in_exactly_sixty() {
    let timer = timer();
    assert_eq!(timer.state().phase(), CooldownPhase::Counting(60));

    for tick in 1..=60u32 {
        assert!(!timer.can_resend());
        let state = timer.tick();
        assert_eq!(state.seconds_remaining(), 60 - tick);
        assert_eq!(state.can_resend(), tick == 60);
    }
    assert_eq!(timer.state().phase(), CooldownPhase::Ready);

    // Extra ticks keep it ready
    assert_eq!(timer.tick(), CooldownState::ready());
}

#[tokio::test(start_paused = true)]
async fn test_started_timer_counts_down_once_per_second() {
    let timer = timer();
    timer.start();

    elapse_ms(500).await;
    assert_eq!(timer.state().seconds_remaining(), 60);

    for expected in (0..60u32).rev() {
        elapse_ms(1_000).await;
        assert_eq!(timer.state().seconds_remaining(), expected);
        assert_eq!(timer.can_resend(), expected == 0);
    }

    elapse_ms(5_000).await;
    assert_eq!(timer.state(), CooldownState::ready());
}

#[tokio::test(start_paused = true)]
async fn test_resend_triggered_requires_ready() {
    let timer = timer();
    timer.start();
    elapse_ms(10_500).await;

    assert_eq!(
        timer.resend_triggered(),
        Err(VerificationError::CooldownActive { seconds_remaining: 50 })
    );
    assert_eq!(timer.state().seconds_remaining(), 50);

    elapse_ms(50_000).await;
    assert!(timer.can_resend());

    timer.resend_triggered().unwrap();
    assert_eq!(timer.state().phase(), CooldownPhase::Counting(60));

    elapse_ms(1_500).await;
    assert_eq!(timer.state().seconds_remaining(), 59);
}

#[tokio::test(start_paused = true)]
async fn test_restart_cancels_previous_ticks() {
    let timer = timer();
    timer.start();
    elapse_ms(20_500).await;
    assert_eq!(timer.state().seconds_remaining(), 40);

    timer.start();
    assert_eq!(timer.state().seconds_remaining(), 60);

    // Only one task ticks: one decrement per second
    elapse_ms(3_500).await;
    assert_eq!(timer.state().seconds_remaining(), 57);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_freezes_state() {
    let timer = timer();
    timer.start();
    elapse_ms(5_500).await;

    timer.cancel();
    elapse_ms(30_000).await;
    assert_eq!(timer.state().seconds_remaining(), 55);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_each_tick() {
    let timer = timer();
    let mut rx = timer.subscribe();
    timer.start();

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().seconds_remaining(), 60);

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().seconds_remaining(), 59);
}

#[tokio::test(start_paused = true)]
async fn test_zero_length_cooldown_is_immediately_ready() {
    let timer = ResendCooldownTimer::new(0, Duration::from_secs(1));
    timer.start();
    assert!(timer.can_resend());
}
