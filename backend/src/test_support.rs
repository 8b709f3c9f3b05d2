//! Test utilities shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use parking_lot::Mutex;

/// Clock frozen at a chosen instant until a test advances it.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use mockable::Clock;
/// use pressroom::test_support::MutableClock;
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let clock = MutableClock::new(start);
/// clock.advance_seconds(90);
/// assert_eq!((clock.utc() - start).num_seconds(), 90);
/// ```
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.0.lock() += TimeDelta::seconds(seconds);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock()
    }
}
