//! Unified error types for the EcoLeague API
//!
//! This module defines error types for each layer:
//! - `LeagueError`: Contract violations inside the ranking/transition engine
//! - `DomainError`: Persistence and lookup errors raised by ports
//! - `AppError`: Application layer errors (wraps both for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::entities::{LeagueId, ParticipantId};

/// Engine errors - configuration and programming errors, never clamped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeagueError {
    #[error("Unknown league: {0}")]
    UnknownLeague(LeagueId),

    #[error("Rank {rank} is outside 1..={total} for league {league}")]
    InvalidRank {
        rank: u32,
        total: u32,
        league: LeagueId,
    },

    #[error("Invalid league configuration: {0}")]
    InvalidConfig(String),

    #[error("Participant {participant} belongs to league {actual}, expected {expected}")]
    MixedLeagues {
        participant: ParticipantId,
        expected: LeagueId,
        actual: LeagueId,
    },

    #[error("Invalid participant record: {0}")]
    InvalidParticipant(String),
}

/// Domain layer errors - raised by repositories and services
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    League(#[from] LeagueError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::AlreadyExists(msg)) => {
                (StatusCode::CONFLICT, "Already exists", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::League(LeagueError::UnknownLeague(id)) => (
                StatusCode::NOT_FOUND,
                "Unknown league",
                Some(id.to_string()),
            ),
            AppError::League(e) => {
                tracing::error!("League engine error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "League engine error",
                    None,
                )
            }
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
