//! Lockout countdown timer
//!
//! Idle until armed with an unlock timestamp, then recomputes the remaining
//! seconds from the wall clock on every tick until it reaches zero. Zero is
//! published like any other tick and held for one more tick before the timer
//! returns to idle. The countdown runs as a Tokio task owned by the timer: re-arming replaces it,
//! and cancelling or dropping the timer aborts it.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::domain::entities::LockoutState;

use super::traits::Clock;
use super::types::LockoutStatus;

/// Receives countdown progress
pub trait LockoutObserver: Send + Sync {
    /// Called on every tick, including the final one at zero
    fn on_tick(&self, state: &LockoutState);

    /// Called once, one tick after the countdown reaches zero
    fn on_expired(&self);
}

/// Cancellable countdown towards a lockout expiry
pub struct LockoutTimer {
    clock: Arc<dyn Clock>,
    tick: Duration,
    status: Arc<watch::Sender<LockoutStatus>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl LockoutTimer {
    /// Create an idle timer that ticks every `tick`
    pub fn new(clock: Arc<dyn Clock>, tick: Duration) -> Self {
        let (status, _) = watch::channel(LockoutStatus::Idle);
        Self {
            clock,
            tick,
            status: Arc::new(status),
            task: Mutex::new(None),
        }
    }

    /// Start counting down to `until`, replacing any running countdown
    ///
    /// Returns the initial state, or `None` when `until` has already passed
    /// or there is no Tokio runtime to run the countdown on.
    pub fn arm(
        &self,
        until: DateTime<Utc>,
        observer: Arc<dyn LockoutObserver>,
    ) -> Option<LockoutState> {
        self.abort_task();

        let Some(state) = LockoutState::new(until, self.clock.now()) else {
            self.status.send_replace(LockoutStatus::Idle);
            return None;
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(
                until = %until,
                event = "lockout_timer_no_runtime",
                "No Tokio runtime available, lockout countdown not started"
            );
            self.status.send_replace(LockoutStatus::Idle);
            return None;
        };

        self.status.send_replace(state.into());
        tracing::info!(
            until = %until,
            remaining_seconds = state.remaining_seconds,
            event = "lockout_armed",
            "Verification locked, countdown started"
        );

        let handle = runtime.spawn(run_countdown(
            state,
            self.clock.clone(),
            self.tick,
            self.status.clone(),
            observer,
        ));
        *self.task.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);

        Some(state)
    }

    /// Stop the countdown without firing the expiry callback
    pub fn cancel(&self) {
        if self.abort_task() {
            tracing::debug!(event = "lockout_cancelled", "Lockout countdown cancelled");
        }
        self.status.send_replace(LockoutStatus::Idle);
    }

    /// Current status
    pub fn status(&self) -> LockoutStatus {
        *self.status.borrow()
    }

    pub fn is_active(&self) -> bool {
        self.status().is_active()
    }

    /// Subscribe to status changes
    pub fn subscribe(&self) -> watch::Receiver<LockoutStatus> {
        self.status.subscribe()
    }

    fn abort_task(&self) -> bool {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        match task.take() {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                running
            }
            None => false,
        }
    }
}

impl Drop for LockoutTimer {
    fn drop(&mut self) {
        self.abort_task();
    }
}

async fn run_countdown(
    mut state: LockoutState,
    clock: Arc<dyn Clock>,
    tick: Duration,
    status: Arc<watch::Sender<LockoutStatus>>,
    observer: Arc<dyn LockoutObserver>,
) {
    let mut interval = tokio::time::interval_at(Instant::now() + tick, tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        // Remaining time comes from the wall clock, never from the tick count.
        state.refresh(clock.now());
        observer.on_tick(&state);
        status.send_replace(state.into());

        if state.is_expired() {
            break;
        }
    }

    // `0:00` stays up for one tick before the lockout clears.
    interval.tick().await;
    observer.on_expired();
    status.send_replace(LockoutStatus::Idle);
    tracing::info!(event = "lockout_expired", "Verification lockout expired");
}
