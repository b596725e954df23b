//! SeaORM entities
//!
//! Table models for the PostgreSQL adapter. Domain code never sees these;
//! the repositories convert them into `domain::entities` types.

pub mod league_epochs;
pub mod participants;
