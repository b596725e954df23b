//! League service
//!
//! Use cases over the ranking engine: leaderboards, standings, enrolment,
//! point ingestion and epoch processing. Epoch processing snapshots every
//! league first, computes each league's transition on its own blocking
//! worker, then applies each league atomically through the repository.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinSet;

use crate::app::epoch_clock::{Countdown, EpochClock};
use crate::app::ranking::rank;
use crate::app::transition::transition_league;
use crate::domain::entities::{
    EpochSummary, League, LeagueId, LeagueTable, NewParticipant, Participant, ParticipantId,
    RankedParticipant, TransitionResult,
};
use crate::domain::ports::{Clock, EpochRepository, ParticipantRepository};
use crate::error::{AppError, DomainError, LeagueError};

/// A league with its neighbours in the tier sequence
#[derive(Debug, Clone, Serialize)]
pub struct LeagueNeighbors {
    pub league: League,
    pub previous: Option<League>,
    pub next: Option<League>,
}

/// Where the current epoch stands
#[derive(Debug, Clone, Serialize)]
pub struct EpochStatus {
    pub now: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub remaining_seconds: i64,
    pub countdown: Countdown,
    pub label: String,
}

/// Outcome of processing one epoch boundary
#[derive(Debug, Clone, Serialize)]
pub struct EpochReport {
    pub epoch_end: DateTime<Utc>,
    /// Leagues transitioned by this run
    pub processed: Vec<EpochSummary>,
    /// Leagues that already carried a marker for this boundary
    pub skipped: Vec<LeagueId>,
}

/// Service for league standings and epoch transitions
pub struct LeagueService<PR, ER>
where
    PR: ParticipantRepository + ?Sized,
    ER: EpochRepository + ?Sized,
{
    participants: Arc<PR>,
    epochs: Arc<ER>,
    table: Arc<LeagueTable>,
    epoch_clock: EpochClock,
    clock: Arc<dyn Clock>,
}

impl<PR, ER> LeagueService<PR, ER>
where
    PR: ParticipantRepository + ?Sized,
    ER: EpochRepository + ?Sized,
{
    pub fn new(
        participants: Arc<PR>,
        epochs: Arc<ER>,
        table: Arc<LeagueTable>,
        epoch_clock: EpochClock,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            participants,
            epochs,
            table,
            epoch_clock,
            clock,
        }
    }

    pub fn table(&self) -> &LeagueTable {
        &self.table
    }

    pub fn epoch_clock(&self) -> &EpochClock {
        &self.epoch_clock
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ========== Queries ==========

    /// All leagues, entry tier first
    pub fn leagues(&self) -> Vec<League> {
        self.table.iter().cloned().collect()
    }

    /// A league with its previous and next tiers
    pub fn league_with_neighbors(&self, id: &LeagueId) -> Result<LeagueNeighbors, AppError> {
        let league = self.table.get(id)?.clone();
        let previous = self.table.previous_league(id)?.cloned();
        let next = self.table.next_league(id)?.cloned();
        Ok(LeagueNeighbors {
            league,
            previous,
            next,
        })
    }

    /// Ranked view of one league for the current epoch
    pub async fn leaderboard(&self, id: &LeagueId) -> Result<Vec<RankedParticipant>, AppError> {
        let league = self.table.get(id)?;
        let participants = self.participants.list_by_league(id).await?;
        Ok(rank(league, participants)?)
    }

    /// A participant's rank and zone within their league
    pub async fn standing(&self, id: &ParticipantId) -> Result<RankedParticipant, AppError> {
        let participant = self
            .participants
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Participant {} not found", id)))?;

        self.leaderboard(&participant.league)
            .await?
            .into_iter()
            .find(|r| r.id() == *id)
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Participant {} missing from league {} leaderboard",
                    id, participant.league
                ))
            })
    }

    pub fn epoch_status(&self) -> EpochStatus {
        let now = self.clock.now();
        let ends_at = self.epoch_clock.next_boundary(now);
        let remaining = ends_at - now;
        let countdown = self.epoch_clock.countdown(now);
        EpochStatus {
            now,
            ends_at,
            remaining_seconds: remaining.num_seconds(),
            countdown,
            label: countdown.to_string(),
        }
    }

    // ========== Commands ==========

    /// Enrol a participant in the entry league with zero points
    pub async fn enroll(&self, id: ParticipantId) -> Result<Participant, AppError> {
        let new_participant = NewParticipant {
            id,
            league: self.table.entry().id.clone(),
        };
        let participant = self
            .participants
            .create(&new_participant, self.clock.now())
            .await?;

        tracing::info!(
            participant_id = %participant.id,
            league = %participant.league,
            "Participant enrolled"
        );

        Ok(participant)
    }

    /// Add points earned this epoch. Non-positive amounts are rejected.
    pub async fn add_points(&self, id: &ParticipantId, points: i64) -> Result<Participant, AppError> {
        if points <= 0 {
            return Err(DomainError::Validation(format!(
                "points must be positive, got {}",
                points
            ))
            .into());
        }
        let points = u32::try_from(points).map_err(|_| {
            DomainError::Validation(format!("points {} exceed the per-record limit", points))
        })?;

        let participant = self.participants.add_points(id, points).await?;

        tracing::debug!(
            participant_id = %id,
            added = points,
            total = participant.points,
            "Points added"
        );

        Ok(participant)
    }

    // ========== Epoch Processing ==========

    /// Apply the transition for the boundary at `epoch_end`.
    ///
    /// Leagues already marked for this boundary are skipped, so running this
    /// twice for the same boundary changes nothing the second time.
    pub async fn process_epoch(&self, epoch_end: DateTime<Utc>) -> Result<EpochReport, AppError> {
        let mut snapshots = Vec::new();
        let mut skipped = Vec::new();

        for league in self.table.iter() {
            if self
                .epochs
                .find_summary(&league.id, epoch_end)
                .await?
                .is_some()
            {
                skipped.push(league.id.clone());
                continue;
            }

            // Cohorts moved in by this boundary already had their transition
            let participants: Vec<Participant> = self
                .participants
                .list_by_league(&league.id)
                .await?
                .into_iter()
                .filter(|p| !p.transitioned_at(epoch_end))
                .collect();
            snapshots.push((league.id.clone(), participants));
        }

        let computed = self.compute_transitions(snapshots).await?;

        let processed_at = self.clock.now();
        let mut processed = Vec::new();
        for (league_id, results) in computed {
            let summary = EpochSummary::from_results(league_id, epoch_end, &results, processed_at);
            match self.epochs.apply_transition(&summary, &results).await {
                Ok(()) => {
                    tracing::info!(
                        league = %summary.league,
                        epoch_end = %epoch_end,
                        promoted = summary.promoted,
                        demoted = summary.demoted,
                        stayed = summary.stayed,
                        total = summary.total(),
                        "League transitioned"
                    );
                    processed.push(summary);
                }
                Err(DomainError::AlreadyExists(_)) => {
                    tracing::warn!(
                        league = %summary.league,
                        epoch_end = %epoch_end,
                        "League already transitioned by another run"
                    );
                    skipped.push(summary.league);
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(
            epoch_end = %epoch_end,
            processed = processed.len(),
            skipped = skipped.len(),
            "Epoch processed"
        );

        Ok(EpochReport {
            epoch_end,
            processed,
            skipped,
        })
    }

    /// Process the most recent boundary at or before now
    pub async fn process_latest_epoch(&self) -> Result<EpochReport, AppError> {
        let boundary = self.epoch_clock.previous_boundary(self.clock.now());
        self.process_epoch(boundary).await
    }

    /// Rank and transition each league on its own blocking worker
    async fn compute_transitions(
        &self,
        snapshots: Vec<(LeagueId, Vec<Participant>)>,
    ) -> Result<BTreeMap<LeagueId, Vec<TransitionResult>>, AppError> {
        let mut workers = JoinSet::new();
        for (league_id, participants) in snapshots {
            let table = self.table.clone();
            workers.spawn_blocking(move || -> Result<_, LeagueError> {
                let league = table.get(&league_id)?;
                let ranked = rank(league, participants)?;
                let results = transition_league(&table, &league_id, &ranked)?;
                Ok((league_id, results))
            });
        }

        let mut computed = BTreeMap::new();
        while let Some(joined) = workers.join_next().await {
            let (league_id, results) = joined
                .map_err(|e| AppError::Internal(format!("transition worker failed: {}", e)))??;
            computed.insert(league_id, results);
        }
        Ok(computed)
    }
}
