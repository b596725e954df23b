//! Test utilities
//!
//! Manual in-memory implementations of the ports and test fixtures.
//! The epoch repository shares the participant store so transitions are
//! visible through both ports, as they are against PostgreSQL.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
