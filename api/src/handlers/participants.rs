//! Participant handlers
//!
//! Standings are public. Enrolment and point ingestion are admin routes
//! called by the scan-processing backend.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{LeagueId, Participant, ParticipantId, RankedParticipant, Zone};
use crate::error::AppError;
use crate::AppState;

/// Request body for enrolment
#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    /// User id issued by the auth provider
    pub participant_id: Uuid,
}

/// Request body for point ingestion
#[derive(Debug, Deserialize)]
pub struct AddPointsRequest {
    pub points: i64,
}

#[derive(Debug, Serialize)]
pub struct ParticipantResponse {
    pub participant_id: ParticipantId,
    pub league: LeagueId,
    pub points: u32,
}

impl From<Participant> for ParticipantResponse {
    fn from(p: Participant) -> Self {
        Self {
            participant_id: p.id,
            league: p.league,
            points: p.points,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StandingResponse {
    pub participant_id: ParticipantId,
    pub league: LeagueId,
    pub points: u32,
    pub rank: u32,
    pub zone: Zone,
}

impl From<RankedParticipant> for StandingResponse {
    fn from(r: RankedParticipant) -> Self {
        Self {
            participant_id: r.participant.id,
            league: r.participant.league,
            points: r.participant.points,
            rank: r.rank,
            zone: r.zone,
        }
    }
}

/// POST /participants
///
/// Enrol a participant in the entry league.
pub async fn enroll_participant(
    State(state): State<AppState>,
    Json(request): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<ParticipantResponse>), AppError> {
    let participant = state
        .league_service
        .enroll(ParticipantId(request.participant_id))
        .await?;
    Ok((StatusCode::CREATED, Json(participant.into())))
}

/// POST /participants/:id/points
///
/// Add points earned this epoch.
pub async fn add_points(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddPointsRequest>,
) -> Result<Json<ParticipantResponse>, AppError> {
    let participant = state
        .league_service
        .add_points(&ParticipantId(id), request.points)
        .await?;
    Ok(Json(participant.into()))
}

/// GET /participants/:id
///
/// Rank and zone of a participant within their league.
pub async fn get_standing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StandingResponse>, AppError> {
    let standing = state.league_service.standing(&ParticipantId(id)).await?;
    Ok(Json(standing.into()))
}
