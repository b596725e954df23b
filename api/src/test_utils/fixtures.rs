//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{TimeZone, Utc};

use crate::domain::entities::{LeagueId, Participant, ParticipantId};

/// Create a bronze participant with no points
pub fn test_participant() -> Participant {
    test_participant_with(ParticipantId::new(), "bronze", 0)
}

/// Create a participant with a specific id, league and point total
pub fn test_participant_with(id: ParticipantId, league: &str, points: u32) -> Participant {
    Participant {
        id,
        points,
        league: LeagueId::new(league),
        joined_at: Utc.with_ymd_and_hms(2026, 9, 1, 8, 0, 0).unwrap(),
        last_transition_epoch: None,
    }
}
