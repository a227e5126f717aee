//! Time sources for the store and the debouncers.

use chrono::{DateTime, Duration, Utc};
use std::cell::Cell;

/// Source of "now" for timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to. Every call to `now` advances by
/// `step` afterwards, so consecutive mutations get distinct timestamps.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Cell<DateTime<Utc>>,
    step: Duration,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_step(start, Duration::zero())
    }

    pub fn with_step(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            current: Cell::new(start),
            step,
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get() + by);
    }

    /// Reads the time without stepping.
    pub fn peek(&self) -> DateTime<Utc> {
        self.current.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let now = self.current.get();
        self.current.set(now + self.step);
        now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
