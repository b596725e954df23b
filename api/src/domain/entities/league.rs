//! League domain entity
//!
//! A league is a capacity-bounded tier with its own promotion and demotion
//! thresholds. The full tier sequence is held by a [`LeagueTable`], which is
//! built once at startup and passed explicitly to everything that needs it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::LeagueError;

/// Unique identifier for a league tier (e.g. `"bronze"`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueId(pub String);

impl LeagueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LeagueId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for LeagueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable configuration of a single league tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    /// Position in the tier sequence; lowest is the entry tier
    pub order: u32,
    /// Capacity of the league
    pub total_participants: u32,
    /// Number of top ranks that move up at the epoch boundary
    pub promotion_count: u32,
    /// Number of bottom ranks that move down at the epoch boundary
    pub demotion_count: u32,
}

impl League {
    pub fn new(
        id: impl Into<String>,
        order: u32,
        total_participants: u32,
        promotion_count: u32,
        demotion_count: u32,
    ) -> Self {
        Self {
            id: LeagueId::new(id),
            order,
            total_participants,
            promotion_count,
            demotion_count,
        }
    }

    /// Check the per-league invariants (counts fit within capacity)
    pub fn validate(&self) -> Result<(), LeagueError> {
        if self.promotion_count > self.total_participants {
            return Err(LeagueError::InvalidConfig(format!(
                "league {}: promotion_count {} exceeds total_participants {}",
                self.id, self.promotion_count, self.total_participants
            )));
        }
        if self.demotion_count > self.total_participants {
            return Err(LeagueError::InvalidConfig(format!(
                "league {}: demotion_count {} exceeds total_participants {}",
                self.id, self.demotion_count, self.total_participants
            )));
        }
        let moving = self
            .promotion_count
            .checked_add(self.demotion_count)
            .ok_or_else(|| {
                LeagueError::InvalidConfig(format!(
                    "league {}: promotion_count + demotion_count overflows",
                    self.id
                ))
            })?;
        if moving > self.total_participants {
            return Err(LeagueError::InvalidConfig(format!(
                "league {}: promotion_count + demotion_count ({}) exceeds total_participants {}",
                self.id, moving, self.total_participants
            )));
        }
        Ok(())
    }

    /// First rank of the demotion zone, if the league demotes at all
    pub fn demotion_threshold(&self) -> Option<u32> {
        (self.demotion_count > 0).then(|| self.total_participants - self.demotion_count + 1)
    }

    /// Same thresholds, with capacity widened to hold `field_size` ranks.
    ///
    /// Used when a league is over-populated after cohorts merge in; the
    /// demotion zone stays anchored to the bottom of the actual field.
    pub fn widened_to(&self, field_size: u32) -> League {
        League {
            total_participants: self.total_participants.max(field_size),
            ..self.clone()
        }
    }
}

/// The ordered, validated sequence of league tiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueTable {
    /// Sorted by `order`, entry tier first
    leagues: Vec<League>,
}

impl LeagueTable {
    /// Build a table, enforcing every configuration invariant.
    pub fn new(mut leagues: Vec<League>) -> Result<Self, LeagueError> {
        if leagues.is_empty() {
            return Err(LeagueError::InvalidConfig(
                "league table must contain at least one league".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        let mut orders = HashSet::new();
        for league in &leagues {
            league.validate()?;
            if !ids.insert(league.id.clone()) {
                return Err(LeagueError::InvalidConfig(format!(
                    "duplicate league id {}",
                    league.id
                )));
            }
            if !orders.insert(league.order) {
                return Err(LeagueError::InvalidConfig(format!(
                    "duplicate league order {}",
                    league.order
                )));
            }
        }

        leagues.sort_by_key(|l| l.order);

        let entry = &leagues[0];
        if entry.demotion_count != 0 {
            return Err(LeagueError::InvalidConfig(format!(
                "entry league {} must have demotion_count 0",
                entry.id
            )));
        }
        let top = &leagues[leagues.len() - 1];
        if top.promotion_count != 0 {
            return Err(LeagueError::InvalidConfig(format!(
                "top league {} must have promotion_count 0",
                top.id
            )));
        }

        Ok(Self { leagues })
    }

    /// Look up a league, failing on unknown ids
    pub fn get(&self, id: &LeagueId) -> Result<&League, LeagueError> {
        self.find(id)
            .ok_or_else(|| LeagueError::UnknownLeague(id.clone()))
    }

    pub fn find(&self, id: &LeagueId) -> Option<&League> {
        self.leagues.iter().find(|l| &l.id == id)
    }

    /// The lowest tier, where new participants start
    pub fn entry(&self) -> &League {
        &self.leagues[0]
    }

    /// The highest tier
    pub fn top(&self) -> &League {
        &self.leagues[self.leagues.len() - 1]
    }

    /// The tier directly below `id`, or `None` for the entry tier
    pub fn previous_league(&self, id: &LeagueId) -> Result<Option<&League>, LeagueError> {
        let current = self.get(id)?;
        Ok(self
            .leagues
            .iter()
            .filter(|l| l.order < current.order)
            .max_by_key(|l| l.order))
    }

    /// The tier directly above `id`, or `None` for the top tier
    pub fn next_league(&self, id: &LeagueId) -> Result<Option<&League>, LeagueError> {
        let current = self.get(id)?;
        Ok(self
            .leagues
            .iter()
            .filter(|l| l.order > current.order)
            .min_by_key(|l| l.order))
    }

    pub fn iter(&self) -> impl Iterator<Item = &League> {
        self.leagues.iter()
    }

    pub fn len(&self) -> usize {
        self.leagues.len()
    }
}
