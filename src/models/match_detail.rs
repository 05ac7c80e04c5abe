//! Match detail models as returned by the match-v5 API.
//!
//! Only the fields the scoring pipeline reads are modelled; everything else
//! in the payload is ignored during deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of item slots on a participant (six inventory slots plus trinket).
pub const ITEM_SLOTS: usize = 7;

/// Full match payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDetail {
    pub info: MatchInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    /// Epoch milliseconds
    pub game_creation: i64,

    /// Seconds
    pub game_duration: i64,

    pub game_mode: String,

    pub participants: Vec<ParticipantRecord>,
}

/// Derived challenge metrics. Absent on older game versions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenges {
    /// Fraction 0.0..=1.0
    #[serde(default)]
    pub team_damage_percentage: Option<f64>,

    /// Fraction 0.0..=1.0
    #[serde(default)]
    pub kill_participation: Option<f64>,
}

/// One participant's end-of-game record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub puuid: String,

    #[serde(default)]
    pub riot_id_game_name: Option<String>,

    #[serde(default)]
    pub riot_id_tag_line: Option<String>,

    /// Legacy display name, still populated on some payloads
    #[serde(default)]
    pub summoner_name: Option<String>,

    pub champion_name: String,

    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,

    pub gold_earned: u32,
    pub total_damage_dealt_to_champions: u32,
    pub total_damage_taken: u32,
    pub vision_score: u32,

    pub total_minions_killed: u32,
    pub neutral_minions_killed: u32,

    pub item0: u32,
    pub item1: u32,
    pub item2: u32,
    pub item3: u32,
    pub item4: u32,
    pub item5: u32,
    pub item6: u32,

    /// 100 (blue) or 200 (red)
    pub team_id: u32,

    pub win: bool,

    /// Seconds
    pub time_played: u32,

    #[serde(default)]
    pub challenges: Option<Challenges>,
}

impl ParticipantRecord {
    /// Item slots in provider order, 0 marking an empty slot.
    pub fn items(&self) -> [u32; ITEM_SLOTS] {
        [
            self.item0, self.item1, self.item2, self.item3, self.item4, self.item5, self.item6,
        ]
    }

    pub fn team_damage_percentage(&self) -> f64 {
        self.challenges
            .as_ref()
            .and_then(|c| c.team_damage_percentage)
            .unwrap_or(0.0)
    }

    pub fn kill_participation(&self) -> f64 {
        self.challenges
            .as_ref()
            .and_then(|c| c.kill_participation)
            .unwrap_or(0.0)
    }

    /// Display name: Riot ID name, then legacy summoner name, then "Unknown".
    pub fn display_name(&self) -> String {
        [&self.riot_id_game_name, &self.summoner_name]
            .into_iter()
            .flatten()
            .find(|n| !n.is_empty())
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Header fields of a fetched match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSummary {
    pub match_id: String,
    pub created_at: DateTime<Utc>,
    pub duration_seconds: i64,
    pub mode: String,
}

impl MatchSummary {
    /// Returns `None` when the creation timestamp is out of range.
    pub fn from_info(match_id: &str, info: &MatchInfo) -> Option<Self> {
        Some(Self {
            match_id: match_id.to_string(),
            created_at: DateTime::from_timestamp_millis(info.game_creation)?,
            duration_seconds: info.game_duration,
            mode: info.game_mode.clone(),
        })
    }
}

#[cfg(test)]
impl ParticipantRecord {
    /// A 30-minute participant with round numbers, for tests.
    pub(crate) fn sample(puuid: &str, kills: u32, deaths: u32, assists: u32) -> Self {
        Self {
            puuid: puuid.to_string(),
            riot_id_game_name: Some(format!("{}-name", puuid)),
            riot_id_tag_line: Some("TAG".to_string()),
            summoner_name: None,
            champion_name: "Ahri".to_string(),
            kills,
            deaths,
            assists,
            gold_earned: 12000,
            total_damage_dealt_to_champions: 24000,
            total_damage_taken: 18000,
            vision_score: 30,
            total_minions_killed: 200,
            neutral_minions_killed: 10,
            item0: 3089,
            item1: 3020,
            item2: 0,
            item3: 3157,
            item4: 0,
            item5: 0,
            item6: 3364,
            team_id: 100,
            win: true,
            time_played: 1800,
            challenges: Some(Challenges {
                team_damage_percentage: Some(0.25),
                kill_participation: Some(0.5),
            }),
        }
    }
}
