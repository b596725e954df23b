//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod epoch_repo;
pub mod participant_repo;


pub use epoch_repo::PostgresEpochRepository;
pub use participant_repo::PostgresParticipantRepository;
