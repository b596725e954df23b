//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    EpochSummary, LeagueId, NewParticipant, Participant, ParticipantId, TransitionResult,
};
use crate::domain::ports::{Clock, EpochRepository, ParticipantRepository};
use crate::error::DomainError;

// ============================================================================
// Fixed Clock
// ============================================================================

/// Clock that only moves when told to
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap()
    }
}

// ============================================================================
// In-Memory Participant Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryParticipantRepository {
    participants: Arc<RwLock<HashMap<ParticipantId, Participant>>>,
}

impl InMemoryParticipantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with participants for testing
    pub fn with_participants(self, participants: Vec<Participant>) -> Self {
        {
            let mut stored = self.participants.write().unwrap();
            for participant in participants {
                stored.insert(participant.id, participant);
            }
        }
        self
    }

    /// Every stored participant, ordered by id
    pub fn snapshot(&self) -> Vec<Participant> {
        let mut all: Vec<_> = self.participants.read().unwrap().values().cloned().collect();
        all.sort_by_key(|p| p.id);
        all
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn find_by_id(&self, id: &ParticipantId) -> Result<Option<Participant>, DomainError> {
        Ok(self.participants.read().unwrap().get(id).cloned())
    }

    async fn create(
        &self,
        new_participant: &NewParticipant,
        joined_at: DateTime<Utc>,
    ) -> Result<Participant, DomainError> {
        let mut participants = self.participants.write().unwrap();
        if participants.contains_key(&new_participant.id) {
            return Err(DomainError::AlreadyExists(format!(
                "Participant {} already enrolled",
                new_participant.id
            )));
        }

        let participant = Participant {
            id: new_participant.id,
            points: 0,
            league: new_participant.league.clone(),
            joined_at,
            last_transition_epoch: None,
        };
        participants.insert(participant.id, participant.clone());
        Ok(participant)
    }

    async fn list_by_league(&self, league: &LeagueId) -> Result<Vec<Participant>, DomainError> {
        Ok(self
            .participants
            .read()
            .unwrap()
            .values()
            .filter(|p| &p.league == league)
            .cloned()
            .collect())
    }

    async fn add_points(
        &self,
        id: &ParticipantId,
        points: u32,
    ) -> Result<Participant, DomainError> {
        let mut participants = self.participants.write().unwrap();
        let participant = participants
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Participant {} not found", id)))?;
        participant.points = participant
            .points
            .checked_add(points)
            .ok_or_else(|| DomainError::Validation("point total overflow".to_string()))?;
        Ok(participant.clone())
    }
}

// ============================================================================
// In-Memory Epoch Repository
// ============================================================================

/// Shares the participant store so transitions apply atomically
pub struct InMemoryEpochRepository {
    participants: Arc<InMemoryParticipantRepository>,
    summaries: Arc<RwLock<HashMap<(LeagueId, DateTime<Utc>), EpochSummary>>>,
}

impl InMemoryEpochRepository {
    pub fn new(participants: Arc<InMemoryParticipantRepository>) -> Self {
        Self {
            participants,
            summaries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl EpochRepository for InMemoryEpochRepository {
    async fn find_summary(
        &self,
        league: &LeagueId,
        epoch_end: DateTime<Utc>,
    ) -> Result<Option<EpochSummary>, DomainError> {
        Ok(self
            .summaries
            .read()
            .unwrap()
            .get(&(league.clone(), epoch_end))
            .cloned())
    }

    async fn latest_processed_boundary(&self) -> Result<Option<DateTime<Utc>>, DomainError> {
        Ok(self
            .summaries
            .read()
            .unwrap()
            .keys()
            .map(|(_, epoch_end)| *epoch_end)
            .max())
    }

    async fn apply_transition(
        &self,
        summary: &EpochSummary,
        results: &[TransitionResult],
    ) -> Result<(), DomainError> {
        let mut summaries = self.summaries.write().unwrap();
        let key = (summary.league.clone(), summary.epoch_end);
        if summaries.contains_key(&key) {
            return Err(DomainError::AlreadyExists(format!(
                "League {} already transitioned at {}",
                summary.league, summary.epoch_end
            )));
        }

        let mut participants = self.participants.participants.write().unwrap();
        if let Some(missing) = results.iter().find(|r| !participants.contains_key(&r.participant_id)) {
            return Err(DomainError::NotFound(format!(
                "Participant {} not found",
                missing.participant_id
            )));
        }
        for result in results {
            if let Some(participant) = participants.get_mut(&result.participant_id) {
                participant.league = result.new_league.clone();
                participant.points = 0;
                participant.last_transition_epoch = Some(summary.epoch_end);
            }
        }

        summaries.insert(key, summary.clone());
        Ok(())
    }
}
