//! Ranking engine
//!
//! Orders one league's participants by points and assigns dense, unique
//! ranks. Equal points are broken by participant id ascending, so the
//! output depends only on the snapshot contents and never on input order.

use std::cmp::Ordering;

use crate::app::zones::classify;
use crate::domain::entities::{League, Participant, RankedParticipant};
use crate::error::LeagueError;

/// Points descending, then participant id ascending
fn standing_order(a: &Participant, b: &Participant) -> Ordering {
    b.points.cmp(&a.points).then_with(|| a.id.cmp(&b.id))
}

/// Sort participants into standing order without assigning zones
pub fn order_by_points(mut participants: Vec<Participant>) -> Vec<Participant> {
    participants.sort_by(standing_order);
    participants
}

/// Rank a league's participants and classify each rank.
///
/// Every participant must belong to `league`. Ties still receive distinct
/// sequential ranks. If the field is larger than the league's capacity, the
/// zones are computed against the league widened to the field size.
pub fn rank(
    league: &League,
    participants: Vec<Participant>,
) -> Result<Vec<RankedParticipant>, LeagueError> {
    if let Some(stray) = participants.iter().find(|p| p.league != league.id) {
        return Err(LeagueError::MixedLeagues {
            participant: stray.id,
            expected: league.id.clone(),
            actual: stray.league.clone(),
        });
    }

    let field_size = u32::try_from(participants.len()).map_err(|_| {
        LeagueError::InvalidParticipant(format!("league {} field is too large", league.id))
    })?;
    let bounds = league.widened_to(field_size);
    if bounds.total_participants > league.total_participants {
        tracing::warn!(
            league = %league.id,
            capacity = league.total_participants,
            field_size = field_size,
            "League is over capacity, widening zones to field size"
        );
    }

    order_by_points(participants)
        .into_iter()
        .zip(1u32..)
        .map(|(participant, rank)| {
            let zone = classify(rank, &bounds)?;
            Ok(RankedParticipant {
                participant,
                rank,
                zone,
            })
        })
        .collect()
}
