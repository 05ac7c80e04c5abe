//! Derived per-participant statistics.

use serde::{Deserialize, Serialize};

use super::{RankView, ITEM_SLOTS};

/// One participant's derived line on the scoreboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStat {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    pub champion: String,

    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub kda: f64,

    /// Lane minions plus jungle monsters
    pub cs: u32,

    pub gold: u32,
    pub damage: u32,
    pub damage_taken: u32,
    pub vision_score: u32,

    pub items: [u32; ITEM_SLOTS],

    pub win: bool,
    pub mvp_score: f64,
    pub gold_per_minute: f64,
    pub damage_per_minute: f64,

    /// Percent, one decimal
    pub kill_participation: f64,

    pub team_id: u32,

    /// Omitted where per-participant rank is not looked up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<RankView>,

    /// 1-based position within the lobby, 0 until ranked.
    pub ranking: u32,
}

/// Running totals for one player across several matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerTotals {
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub cs: u32,
    pub gold: u64,
    pub damage: u64,
    pub vision_score: u32,
    pub mvp_score: f64,
    pub wins: u32,
    pub games: u32,
}

impl PlayerTotals {
    /// Fold one match's line into the totals. Counters saturate.
    pub fn add(&mut self, stat: &PlayerStat) {
        self.kills = self.kills.saturating_add(stat.kills);
        self.deaths = self.deaths.saturating_add(stat.deaths);
        self.assists = self.assists.saturating_add(stat.assists);
        self.cs = self.cs.saturating_add(stat.cs);
        self.gold += u64::from(stat.gold);
        self.damage += u64::from(stat.damage);
        self.vision_score = self.vision_score.saturating_add(stat.vision_score);
        self.mvp_score += stat.mvp_score;
        if stat.win {
            self.wins += 1;
        }
        self.games += 1;
    }
}

/// Per-game means over a player's recent matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateAverages {
    pub kills: f64,
    pub deaths: f64,
    pub assists: f64,

    /// Computed from summed kills/assists/deaths, not a mean of per-game KDA
    pub kda: f64,

    pub cs: f64,
    pub gold: f64,
    pub damage: f64,
    pub vision_score: f64,
    pub mvp_score: f64,

    /// Percent
    pub win_rate: f64,
}
