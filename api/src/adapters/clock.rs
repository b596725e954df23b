//! Wall-clock adapter

use chrono::{DateTime, Utc};

use crate::domain::ports::Clock;

/// Reads the system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
