//! Zone domain entity
//!
//! The rank-derived classification that decides end-of-epoch movement.

use serde::{Deserialize, Serialize};

/// Zone a rank falls into within its league
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Podium,
    Promotion,
    Safe,
    Demotion,
}

impl Zone {
    /// Podium ranks move up exactly like promotion ranks
    pub fn moves_up(&self) -> bool {
        matches!(self, Zone::Podium | Zone::Promotion)
    }

    pub fn moves_down(&self) -> bool {
        matches!(self, Zone::Demotion)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Zone::Podium => write!(f, "podium"),
            Zone::Promotion => write!(f, "promotion"),
            Zone::Safe => write!(f, "safe"),
            Zone::Demotion => write!(f, "demotion"),
        }
    }
}

impl std::str::FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "podium" => Ok(Zone::Podium),
            "promotion" => Ok(Zone::Promotion),
            "safe" => Ok(Zone::Safe),
            "demotion" => Ok(Zone::Demotion),
            _ => Err(format!("Unknown zone: {}", s)),
        }
    }
}
