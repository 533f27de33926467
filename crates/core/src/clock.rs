//! Clock seam — where "now" comes from.
//!
//! Check-in and check-out timestamps, and the day a command lands on, all
//! derive from a single [`Clock`] so the state machine can be exercised at
//! fixed instants in tests.

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// The calendar day the current instant falls on.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The production clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a fixed instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
