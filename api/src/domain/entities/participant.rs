//! Participant domain entity
//!
//! One user's membership in exactly one league during one epoch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::league::LeagueId;
use super::zone::Zone;

/// Unique identifier for a participant (the user id issued by the auth provider)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ParticipantId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user's standing in their current league
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Points accumulated this epoch
    pub points: u32,
    pub league: LeagueId,
    pub joined_at: DateTime<Utc>,
    /// Boundary of the last epoch transition applied to this participant
    pub last_transition_epoch: Option<DateTime<Utc>>,
}

impl Participant {
    /// Whether the transition for `epoch_end` has already moved this participant
    pub fn transitioned_at(&self, epoch_end: DateTime<Utc>) -> bool {
        self.last_transition_epoch == Some(epoch_end)
    }
}

/// Data needed to enrol a new participant
#[derive(Debug, Clone)]
pub struct NewParticipant {
    pub id: ParticipantId,
    pub league: LeagueId,
}

/// Participant with its rank and zone for the current epoch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedParticipant {
    pub participant: Participant,
    /// 1-based, dense and unique within the league
    pub rank: u32,
    pub zone: Zone,
}

impl RankedParticipant {
    pub fn id(&self) -> ParticipantId {
        self.participant.id
    }

    pub fn league(&self) -> &LeagueId {
        &self.participant.league
    }
}
