//! Injected date capability.
//!
//! Borrow and return dates come from a `Clock` handed to the callers that
//! need one, never from an ambient wall-clock read inside business logic.

use chrono::{NaiveDate, Utc};

/// Source of the current date.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Returns today's date.
    fn today(&self) -> NaiveDate;
}

/// Production clock backed by the system time (UTC).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to a fixed date, for tests and backfills.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    /// Creates a clock that always reports the given date.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_tracks_utc_date() {
        let clock = SystemClock;
        assert_eq!(clock.today(), Utc::now().date_naive());
    }

    #[test]
    fn fixed_clock_reports_pinned_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let clock = FixedClock::new(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.today(), date);
    }
}
