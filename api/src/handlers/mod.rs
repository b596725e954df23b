//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod epoch;
pub mod leagues;
pub mod participants;

pub use epoch::{get_epoch, trigger_transition};
pub use leagues::{get_leaderboard, get_league, list_leagues};
pub use participants::{add_points, enroll_participant, get_standing};
