//! Epoch handlers
//!
//! Countdown to the next weekly boundary and the manual transition trigger.

use axum::{extract::State, Json};

use crate::app::{EpochReport, EpochStatus};
use crate::error::AppError;
use crate::AppState;

/// GET /epoch
///
/// When the current epoch ends and a coarse countdown label.
pub async fn get_epoch(State(state): State<AppState>) -> Json<EpochStatus> {
    Json(state.league_service.epoch_status())
}

/// POST /epoch/transition
///
/// Process the most recent boundary now. Leagues already transitioned for
/// that boundary are skipped.
pub async fn trigger_transition(
    State(state): State<AppState>,
) -> Result<Json<EpochReport>, AppError> {
    tracing::info!("Manual epoch transition requested");
    let report = state.league_service.process_latest_epoch().await?;
    Ok(Json(report))
}
