//! Epoch clock
//!
//! Weekly epochs end every Sunday at 00:00 in the configured time
//! reference. All functions take `now` explicitly; callers read it from a
//! [`Clock`](crate::domain::ports::Clock).

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveTime, Offset, TimeZone, Utc};
use serde::Serialize;

/// Length of one epoch
pub const EPOCH_DAYS: i64 = 7;

/// Computes epoch boundaries in a fixed time reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochClock {
    offset: FixedOffset,
}

impl Default for EpochClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl EpochClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The next Sunday 00:00 strictly after `now`.
    ///
    /// A reading exactly on a boundary yields the following week's boundary.
    pub fn next_boundary(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let local = now.with_timezone(&self.offset);
        let weekday = i64::from(local.weekday().num_days_from_sunday());
        let days_until = match (EPOCH_DAYS - weekday) % EPOCH_DAYS {
            0 => EPOCH_DAYS,
            days => days,
        };

        let boundary_local =
            (local.date_naive() + Duration::days(days_until)).and_time(NaiveTime::MIN);
        let boundary_utc =
            boundary_local - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Utc.from_utc_datetime(&boundary_utc)
    }

    /// The most recent boundary at or before `now`
    pub fn previous_boundary(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.next_boundary(now) - Duration::days(EPOCH_DAYS)
    }

    pub fn time_until_boundary(&self, now: DateTime<Utc>) -> Duration {
        self.next_boundary(now) - now
    }

    /// Whether a boundary lies after `last_boundary` and at or before `now`
    pub fn has_crossed_boundary(&self, now: DateTime<Utc>, last_boundary: DateTime<Utc>) -> bool {
        self.previous_boundary(now) > last_boundary
    }

    pub fn countdown(&self, now: DateTime<Utc>) -> Countdown {
        Countdown::from_duration(self.time_until_boundary(now))
    }
}

/// Coarse remaining-time label, one unit only, always rounded down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Countdown {
    Days(i64),
    Hours(i64),
    Minutes(i64),
}

impl Countdown {
    pub fn from_duration(remaining: Duration) -> Self {
        if remaining.num_days() >= 1 {
            Countdown::Days(remaining.num_days())
        } else if remaining.num_hours() >= 1 {
            Countdown::Hours(remaining.num_hours())
        } else {
            Countdown::Minutes(remaining.num_minutes().max(0))
        }
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (value, unit) = match self {
            Countdown::Days(n) => (*n, "day"),
            Countdown::Hours(n) => (*n, "hour"),
            Countdown::Minutes(n) => (*n, "minute"),
        };
        if value == 1 {
            write!(f, "1 {}", unit)
        } else {
            write!(f, "{} {}s", value, unit)
        }
    }
}
