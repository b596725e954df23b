//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    EpochSummary, LeagueId, NewParticipant, Participant, ParticipantId, TransitionResult,
};
use crate::error::DomainError;

/// Repository for Participant entities
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Find a participant by ID
    async fn find_by_id(&self, id: &ParticipantId) -> Result<Option<Participant>, DomainError>;

    /// Enrol a new participant with zero points
    async fn create(
        &self,
        participant: &NewParticipant,
        joined_at: DateTime<Utc>,
    ) -> Result<Participant, DomainError>;

    /// All participants currently in a league (unordered)
    async fn list_by_league(&self, league: &LeagueId) -> Result<Vec<Participant>, DomainError>;

    /// Add points earned this epoch, returning the updated participant
    async fn add_points(
        &self,
        id: &ParticipantId,
        points: u32,
    ) -> Result<Participant, DomainError>;
}

/// Repository for epoch transitions and their processed markers
#[async_trait]
pub trait EpochRepository: Send + Sync {
    /// Marker for a league at a boundary, if that transition was applied
    async fn find_summary(
        &self,
        league: &LeagueId,
        epoch_end: DateTime<Utc>,
    ) -> Result<Option<EpochSummary>, DomainError>;

    /// Most recent boundary for which any league was processed
    async fn latest_processed_boundary(&self) -> Result<Option<DateTime<Utc>>, DomainError>;

    /// Apply one league's transition atomically.
    ///
    /// Moves every participant in `results`, resets their points, stamps
    /// them with `summary.epoch_end` and stores the marker, all or nothing.
    /// Fails with `AlreadyExists` if the marker is already present.
    async fn apply_transition(
        &self,
        summary: &EpochSummary,
        results: &[TransitionResult],
    ) -> Result<(), DomainError>;
}
