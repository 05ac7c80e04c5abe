//! Player identity models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Riot ID as typed by the dashboard user (`name#tag`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub game_name: String,
    pub tag_line: String,
}

impl PlayerIdentity {
    pub fn new(game_name: impl Into<String>, tag_line: impl Into<String>) -> Self {
        Self {
            game_name: game_name.into(),
            tag_line: tag_line.into(),
        }
    }

    /// Whether both halves of the Riot ID are present.
    pub fn is_complete(&self) -> bool {
        !self.game_name.trim().is_empty() && !self.tag_line.trim().is_empty()
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}

impl FromStr for PlayerIdentity {
    type Err = String;

    /// Parse `name#tag`, splitting on the last `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once('#') {
            Some((name, tag)) if !name.trim().is_empty() && !tag.trim().is_empty() => {
                Ok(Self::new(name.trim(), tag.trim()))
            }
            _ => Err(format!("expected a Riot ID like name#tag, got {:?}", s)),
        }
    }
}

/// An identity the provider has resolved to its stable PUUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
}

impl ResolvedIdentity {
    pub fn new(puuid: String, identity: &PlayerIdentity) -> Self {
        Self {
            puuid,
            game_name: identity.game_name.clone(),
            tag_line: identity.tag_line.clone(),
        }
    }
}
