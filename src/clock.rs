use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};

/// Wall-clock source for the tracker.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Used by tests and event replays.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Cell::new(start),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.current.set(at);
    }

    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.current.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
