//! Epoch transition entities
//!
//! The per-participant outcome of an epoch boundary and the per-league
//! summary that marks a boundary as processed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::league::LeagueId;
use super::participant::ParticipantId;
use super::zone::Zone;

/// Direction a participant moved at the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    Promoted,
    Demoted,
    Stayed,
}

impl std::fmt::Display for Movement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Movement::Promoted => write!(f, "promoted"),
            Movement::Demoted => write!(f, "demoted"),
            Movement::Stayed => write!(f, "stayed"),
        }
    }
}

/// New league assignment for one participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionResult {
    pub participant_id: ParticipantId,
    pub previous_league: LeagueId,
    pub new_league: LeagueId,
    pub previous_zone: Zone,
    pub movement: Movement,
    /// Always true; points restart at zero every epoch
    pub points_reset: bool,
}

/// Marker written atomically with a league's transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpochSummary {
    pub league: LeagueId,
    pub epoch_end: DateTime<Utc>,
    pub promoted: u32,
    pub demoted: u32,
    pub stayed: u32,
    pub processed_at: DateTime<Utc>,
}

impl EpochSummary {
    /// Tally a league's results into a summary
    pub fn from_results(
        league: LeagueId,
        epoch_end: DateTime<Utc>,
        results: &[TransitionResult],
        processed_at: DateTime<Utc>,
    ) -> Self {
        let count = |m: Movement| results.iter().filter(|r| r.movement == m).count() as u32;
        Self {
            league,
            epoch_end,
            promoted: count(Movement::Promoted),
            demoted: count(Movement::Demoted),
            stayed: count(Movement::Stayed),
            processed_at,
        }
    }

    pub fn total(&self) -> u32 {
        self.promoted + self.demoted + self.stayed
    }
}
