//! Injectable time source.
//!
//! # Responsibility
//! - Supply `now` for record timestamps and `today` for date-based queries.
//! - Let tests pin or step time without touching the system clock.

use crate::model::Timestamp;
use chrono::{NaiveDate, TimeZone, Utc};
use std::cell::Cell;
use std::rc::Rc;

/// Time source used by the store and collaborators.
pub trait Clock {
    fn now(&self) -> Timestamp;

    /// Calendar date of `now` in UTC.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<Timestamp>,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Clock pinned to noon UTC on the given date.
    ///
    /// Returns `None` for an invalid calendar date.
    pub fn at_date(year: i32, month: u32, day: u32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .map(Self::new)
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}
