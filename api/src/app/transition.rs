//! League transition scheduler
//!
//! Turns ranked, zoned snapshots into next-epoch league assignments.
//! Podium and promotion ranks move up a tier, demotion ranks move down,
//! everyone else stays. Points reset for everybody.

use std::collections::BTreeMap;

use crate::domain::entities::{
    LeagueId, LeagueTable, Movement, ParticipantId, RankedParticipant, TransitionResult,
};
use crate::error::LeagueError;

/// Compute the transition for a single league.
///
/// Leagues are independent of each other, so this can run on its own
/// worker per league.
pub fn transition_league(
    table: &LeagueTable,
    league_id: &LeagueId,
    ranked: &[RankedParticipant],
) -> Result<Vec<TransitionResult>, LeagueError> {
    let league = table.get(league_id)?;
    let above = table.next_league(league_id)?;
    let below = table.previous_league(league_id)?;

    ranked
        .iter()
        .map(|r| {
            if r.league() != league_id {
                return Err(LeagueError::MixedLeagues {
                    participant: r.id(),
                    expected: league_id.clone(),
                    actual: r.league().clone(),
                });
            }

            let target = if r.zone.moves_up() {
                above.map(|l| (&l.id, Movement::Promoted))
            } else if r.zone.moves_down() {
                below.map(|l| (&l.id, Movement::Demoted))
            } else {
                None
            };
            let (new_league, movement) = target.unwrap_or((&league.id, Movement::Stayed));

            Ok(TransitionResult {
                participant_id: r.id(),
                previous_league: league.id.clone(),
                new_league: new_league.clone(),
                previous_zone: r.zone,
                movement,
                points_reset: true,
            })
        })
        .collect()
}

/// Compute transitions for every league in the snapshot
pub fn transition(
    table: &LeagueTable,
    snapshot: &BTreeMap<LeagueId, Vec<RankedParticipant>>,
) -> Result<BTreeMap<ParticipantId, TransitionResult>, LeagueError> {
    let mut results = BTreeMap::new();
    for (league_id, ranked) in snapshot {
        for result in transition_league(table, league_id, ranked)? {
            results.insert(result.participant_id, result);
        }
    }
    Ok(results)
}
