//! Application layer
//!
//! Contains the ranking engine and the use cases built on it.
//! The engine modules (`ranking`, `zones`, `epoch_clock`, `transition`) are
//! pure; the services coordinate them with ports and the clock.

pub mod epoch_clock;
pub mod epoch_scheduler;
pub mod league_config;
pub mod league_service;
pub mod ranking;
pub mod transition;
pub mod zones;

pub use epoch_clock::EpochClock;
pub use epoch_scheduler::EpochScheduler;
pub use league_service::{EpochReport, EpochStatus, LeagueNeighbors, LeagueService};
