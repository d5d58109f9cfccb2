//! Unit tests for the lockout countdown timer
//!
//! Time is paused; the Tokio clock auto-advances whenever the runtime idles.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::LockoutState;
use crate::services::verification::{Clock, LockoutStatus, LockoutTimer};

use super::mocks::{RecordingObserver, TokioClock};

fn timer() -> (LockoutTimer, Arc<TokioClock>) {
    let clock = Arc::new(TokioClock::new());
    (LockoutTimer::new(clock.clone(), Duration::from_secs(1)), clock)
}

#[tokio::test(start_paused = true)]
async fn test_counts_down_to_expiry() {
    let (timer, clock) = timer();
    let observer = Arc::new(RecordingObserver::default());

    let state = timer
        .arm(clock.now() + chrono::Duration::seconds(90), observer.clone())
        .unwrap();
    assert_eq!(state.remaining_seconds, 90);
    assert_eq!(timer.status().display().as_deref(), Some("1:30"));

    tokio::time::sleep(Duration::from_millis(30_500)).await;
    assert_eq!(timer.status().display().as_deref(), Some("1:00"));
    assert_eq!(observer.expired_count(), 0);

    tokio::time::sleep(Duration::from_secs(61)).await;
    let expected: Vec<i64> = (0..=89).rev().collect();
    assert_eq!(observer.ticks(), expected);
    assert_eq!(observer.expired_count(), 1);
    assert_eq!(timer.status(), LockoutStatus::Idle);
    assert!(!timer.is_active());
}

#[tokio::test(start_paused = true)]
async fn test_past_timestamp_does_not_arm() {
    let (timer, clock) = timer();
    let observer = Arc::new(RecordingObserver::default());

    let state = timer.arm(clock.now() - chrono::Duration::seconds(5), observer.clone());

    assert!(state.is_none());
    assert_eq!(timer.status(), LockoutStatus::Idle);
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(observer.ticks().is_empty());
    assert_eq!(observer.expired_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_ticks_without_expiry() {
    let (timer, clock) = timer();
    let observer = Arc::new(RecordingObserver::default());

    timer.arm(clock.now() + chrono::Duration::seconds(10), observer.clone());
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    timer.cancel();

    assert_eq!(timer.status(), LockoutStatus::Idle);
    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(observer.ticks(), vec![9, 8, 7]);
    assert_eq!(observer.expired_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_rearm_replaces_running_countdown() {
    let (timer, clock) = timer();
    let first = Arc::new(RecordingObserver::default());
    let second = Arc::new(RecordingObserver::default());

    timer.arm(clock.now() + chrono::Duration::seconds(10), first.clone());
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    timer.arm(clock.now() + chrono::Duration::seconds(3), second.clone());
    tokio::time::sleep(Duration::from_secs(20)).await;

    assert_eq!(first.ticks(), vec![9, 8]);
    assert_eq!(first.expired_count(), 0);
    assert_eq!(second.ticks(), vec![2, 1, 0]);
    assert_eq!(second.expired_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_drop_aborts_countdown() {
    let (timer, clock) = timer();
    let observer = Arc::new(RecordingObserver::default());

    timer.arm(clock.now() + chrono::Duration::seconds(5), observer.clone());
    drop(timer);
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert!(observer.ticks().is_empty());
    assert_eq!(observer.expired_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_countdown_and_idle() {
    let (timer, clock) = timer();
    let mut updates = timer.subscribe();

    timer.arm(
        clock.now() + chrono::Duration::seconds(3),
        Arc::new(RecordingObserver::default()),
    );
    assert!(updates.borrow_and_update().is_active());

    let mut seen = Vec::new();
    while updates.changed().await.is_ok() {
        let status = *updates.borrow_and_update();
        seen.push(status);
        if status == LockoutStatus::Idle {
            break;
        }
    }

    assert_eq!(seen.last(), Some(&LockoutStatus::Idle));
    let remaining: Vec<i64> = seen
        .iter()
        .filter_map(|status| match status {
            LockoutStatus::CountingDown {
                remaining_seconds, ..
            } => Some(*remaining_seconds),
            LockoutStatus::Idle => None,
        })
        .collect();
    assert_eq!(remaining, vec![2, 1, 0]);
    assert_eq!(seen[seen.len() - 2].display().as_deref(), Some("0:00"));
}

#[tokio::test(start_paused = true)]
async fn test_zero_is_held_for_one_tick() {
    let (timer, clock) = timer();
    let observer = Arc::new(RecordingObserver::default());

    timer.arm(clock.now() + chrono::Duration::seconds(2), observer.clone());

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    assert_eq!(timer.status().display().as_deref(), Some("0:00"));
    assert_eq!(observer.ticks(), vec![1, 0]);
    assert_eq!(observer.expired_count(), 0);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(timer.status(), LockoutStatus::Idle);
    assert_eq!(observer.expired_count(), 1);
}

#[test]
fn test_arm_without_runtime_does_not_lock() {
    let clock = Arc::new(crate::services::verification::SystemClock);
    let timer = LockoutTimer::new(clock.clone(), Duration::from_secs(1));

    let state: Option<LockoutState> = timer.arm(
        clock.now() + chrono::Duration::seconds(30),
        Arc::new(RecordingObserver::default()),
    );

    assert!(state.is_none());
    assert!(!timer.is_active());
}
