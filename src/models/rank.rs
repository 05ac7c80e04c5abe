//! Ranked standing models.

use serde::{Deserialize, Serialize};

/// Tier reported when a player has no standing in the tracked queue.
pub const UNRANKED_TIER: &str = "UNRANKED";

/// A player's standing in one ranked queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankStanding {
    /// e.g. "GOLD", "MASTER"
    pub tier: String,

    /// e.g. "II" (empty for apex tiers on some payloads)
    pub division: String,

    pub league_points: i32,
}

impl RankStanding {
    pub fn new(tier: impl Into<String>, division: impl Into<String>, league_points: i32) -> Self {
        Self {
            tier: tier.into(),
            division: division.into(),
            league_points,
        }
    }
}

/// Rank sub-object as the dashboard consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankView {
    pub tier: String,
    pub division: String,
    pub lp: i32,
}

impl RankView {
    /// Placeholder for unranked players or failed lookups.
    pub fn unranked() -> Self {
        Self {
            tier: UNRANKED_TIER.to_string(),
            division: String::new(),
            lp: 0,
        }
    }

    pub fn from_standing(standing: Option<&RankStanding>) -> Self {
        match standing {
            Some(s) => Self {
                tier: s.tier.clone(),
                division: s.division.clone(),
                lp: s.league_points,
            },
            None => Self::unranked(),
        }
    }

    pub fn is_unranked(&self) -> bool {
        self.tier == UNRANKED_TIER
    }
}
