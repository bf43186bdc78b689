/// Source of the reference "today" date
///
/// Every streak and rate calculation is relative to a calendar day. The
/// store asks a `Clock` for that day instead of reading the system time
/// directly, so sessions and tests can pin it.

use chrono::{Local, NaiveDate};

pub trait Clock {
    /// The current local calendar day, with no time-of-day component
    fn today(&self) -> NaiveDate;
}

/// Reads the local system date on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
