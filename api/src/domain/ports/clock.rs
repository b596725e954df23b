//! Time source port
//!
//! Every wall-clock read in the service goes through this trait so epoch
//! logic can be driven by a fixed clock in tests.

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
