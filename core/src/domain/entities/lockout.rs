//! Lockout state derived from a server-supplied unlock timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An active lockout and the seconds left on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockoutState {
    /// When verification attempts are allowed again
    pub until: DateTime<Utc>,

    /// Whole seconds left, rounded up
    pub remaining_seconds: i64,
}

impl LockoutState {
    /// Create a lockout state, or `None` if `until` is not in the future
    pub fn new(until: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        let remaining_seconds = remaining_seconds(until, now);
        (remaining_seconds > 0).then_some(Self {
            until,
            remaining_seconds,
        })
    }

    /// Recompute the remaining seconds against `now`
    pub fn refresh(&mut self, now: DateTime<Utc>) -> i64 {
        self.remaining_seconds = remaining_seconds(self.until, now);
        self.remaining_seconds
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_seconds <= 0
    }

    /// Countdown as `m:ss`
    pub fn formatted(&self) -> String {
        format_countdown(self.remaining_seconds)
    }
}

/// Whole seconds from `now` until `until`, rounded up and clamped at zero
pub fn remaining_seconds(until: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (until - now).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis + 999) / 1000
    }
}

/// Format seconds as `m:ss` (e.g. `1:30`, `0:05`)
pub fn format_countdown(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
