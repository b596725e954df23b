//! Zone classification
//!
//! Maps a rank within a league to the zone that decides its end-of-epoch
//! movement. Rules are checked in priority order; the first match wins.

use crate::app::league_config::PODIUM_SIZE;
use crate::domain::entities::{League, Zone};
use crate::error::LeagueError;

/// Classify `rank` (1-based) within `league`.
///
/// Podium takes precedence over promotion, so the top tier still has a
/// podium even though it promotes nobody.
pub fn classify(rank: u32, league: &League) -> Result<Zone, LeagueError> {
    if rank < 1 || rank > league.total_participants {
        return Err(LeagueError::InvalidRank {
            rank,
            total: league.total_participants,
            league: league.id.clone(),
        });
    }

    let zone = if rank <= PODIUM_SIZE {
        Zone::Podium
    } else if rank <= league.promotion_count {
        Zone::Promotion
    } else if league.demotion_threshold().is_some_and(|first| rank >= first) {
        Zone::Demotion
    } else {
        Zone::Safe
    };

    Ok(zone)
}
