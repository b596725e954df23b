//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod league;
pub mod participant;
pub mod transition;
pub mod zone;

pub use league::{League, LeagueId, LeagueTable};
pub use participant::{NewParticipant, Participant, ParticipantId, RankedParticipant};
pub use transition::{EpochSummary, Movement, TransitionResult};
pub use zone::Zone;
