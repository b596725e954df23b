//! League configuration
//!
//! Defines the default four-tier table and loads alternate topologies from
//! JSON. The table is built once at startup and injected; nothing here is a
//! process-wide singleton.

use std::path::Path;

use crate::domain::entities::{League, LeagueTable};
use crate::error::LeagueError;

/// Capacity of every default league
pub const DEFAULT_LEAGUE_SIZE: u32 = 30;

/// Bronze promotes most of its field and never demotes
pub const BRONZE_PROMOTION_COUNT: u32 = 25;

/// Silver promotion places
pub const SILVER_PROMOTION_COUNT: u32 = 15;

/// Gold promotion places
pub const GOLD_PROMOTION_COUNT: u32 = 10;

/// Demotion places in every league above the entry tier
pub const DEMOTION_COUNT: u32 = 5;

/// Ranks that always land on the podium, regardless of promotion count
pub const PODIUM_SIZE: u32 = 3;

/// The default league topology, entry tier first
pub fn default_leagues() -> Vec<League> {
    vec![
        League::new("bronze", 1, DEFAULT_LEAGUE_SIZE, BRONZE_PROMOTION_COUNT, 0),
        League::new(
            "silver",
            2,
            DEFAULT_LEAGUE_SIZE,
            SILVER_PROMOTION_COUNT,
            DEMOTION_COUNT,
        ),
        League::new(
            "gold",
            3,
            DEFAULT_LEAGUE_SIZE,
            GOLD_PROMOTION_COUNT,
            DEMOTION_COUNT,
        ),
        League::new("diamond", 4, DEFAULT_LEAGUE_SIZE, 0, DEMOTION_COUNT),
    ]
}

/// Validated default table
pub fn default_table() -> Result<LeagueTable, LeagueError> {
    LeagueTable::new(default_leagues())
}

/// Parse a table from a JSON array of leagues
pub fn table_from_json(json: &str) -> Result<LeagueTable, LeagueError> {
    let leagues: Vec<League> = serde_json::from_str(json)
        .map_err(|e| LeagueError::InvalidConfig(format!("malformed league table: {}", e)))?;
    LeagueTable::new(leagues)
}

/// Load the table from `path`, or fall back to the default topology
pub fn load_table(path: Option<&Path>) -> Result<LeagueTable, LeagueError> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| {
                LeagueError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
            })?;
            let table = table_from_json(&json)?;
            tracing::info!(path = %path.display(), leagues = table.len(), "Loaded league table");
            Ok(table)
        }
        None => default_table(),
    }
}
