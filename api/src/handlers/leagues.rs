//! League handlers
//!
//! Public read-only endpoints: the tier table, neighbour lookups and
//! per-league leaderboards.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::app::LeagueNeighbors;
use crate::domain::entities::{League, LeagueId, ParticipantId, RankedParticipant, Zone};
use crate::error::AppError;
use crate::AppState;

/// One row of a leaderboard
#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub participant_id: ParticipantId,
    pub points: u32,
    pub rank: u32,
    pub zone: Zone,
}

impl From<RankedParticipant> for LeaderboardEntry {
    fn from(r: RankedParticipant) -> Self {
        Self {
            participant_id: r.participant.id,
            points: r.participant.points,
            rank: r.rank,
            zone: r.zone,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub league: League,
    pub entries: Vec<LeaderboardEntry>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct LeaguesResponse {
    pub leagues: Vec<League>,
}

/// GET /leagues
///
/// The league table, entry tier first.
pub async fn list_leagues(State(state): State<AppState>) -> Json<LeaguesResponse> {
    Json(LeaguesResponse {
        leagues: state.league_service.leagues(),
    })
}

/// GET /leagues/:id
///
/// One league with its previous and next tiers.
pub async fn get_league(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LeagueNeighbors>, AppError> {
    Ok(Json(
        state
            .league_service
            .league_with_neighbors(&LeagueId::new(id))?,
    ))
}

/// GET /leagues/:id/leaderboard
///
/// Ranked view of the league for the current epoch.
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let league_id = LeagueId::new(id);
    let league = state.league_service.table().get(&league_id)?.clone();
    let ranked = state.league_service.leaderboard(&league_id).await?;
    let entries: Vec<LeaderboardEntry> = ranked.into_iter().map(Into::into).collect();

    Ok(Json(LeaderboardResponse {
        league,
        total: entries.len(),
        entries,
    }))
}
