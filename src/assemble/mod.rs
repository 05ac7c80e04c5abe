//! Response assembly.
//!
//! Pure shaping of aggregator output into the two payloads the dashboard
//! consumes: the single-match lobby view and the rolling multi-match view.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculate::{kda, round_to};
use crate::models::{
    AggregateAverages, MatchInfo, MatchSummary, PlayerStat, PlayerTotals, RankStanding, RankView,
    ResolvedIdentity,
};

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("Match {match_id} has an out-of-range creation timestamp: {millis}")]
    InvalidTimestamp { match_id: String, millis: i64 },
}

/// Single-match view of a full lobby.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyResponse {
    pub match_id: String,
    pub game_creation: String,
    pub game_duration: i64,
    pub game_mode: String,
    pub players: Vec<PlayerStat>,
}

/// The requested player in the rolling view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingPlayer {
    pub game_name: String,
    pub tag_line: String,
    pub rank: RankView,
}

/// One match in the rolling view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingMatch {
    pub match_id: String,
    pub game_creation: String,
    pub game_duration: i64,
    pub game_mode: String,
    pub win: bool,

    /// The full lobby, ranked by MVP score. Ranks are not looked up per
    /// match, so these entries carry no `rank` field; the requested
    /// player's rank is reported once on [`RollingResponse::player`].
    pub players: Vec<PlayerStat>,
    pub requested_player: Option<PlayerStat>,
}

/// Recent-matches view for a single player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingResponse {
    pub player: RollingPlayer,
    pub matches: Vec<RollingMatch>,
    pub averages: AggregateAverages,
    pub total_games: u32,
}

/// RFC 3339 in UTC with millisecond precision.
pub fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Extract the header fields of a fetched match.
pub fn summarize(match_id: &str, info: &MatchInfo) -> Result<MatchSummary, AssembleError> {
    MatchSummary::from_info(match_id, info).ok_or_else(|| AssembleError::InvalidTimestamp {
        match_id: match_id.to_string(),
        millis: info.game_creation,
    })
}

/// Sort a lobby by descending MVP score and number it 1..K.
///
/// The sort is stable: equal scores keep their input order.
pub fn rank_lobby(mut players: Vec<PlayerStat>) -> Vec<PlayerStat> {
    players.sort_by(|a, b| b.mvp_score.total_cmp(&a.mvp_score));
    for (idx, player) in players.iter_mut().enumerate() {
        player.ranking = idx as u32 + 1;
    }
    players
}

/// Per-game means of a player's totals. All zeros when no games were counted.
pub fn averages(totals: &PlayerTotals) -> AggregateAverages {
    let games = totals.games;
    let mean = |sum: f64, decimals: i32| {
        if games == 0 {
            0.0
        } else {
            round_to(sum / f64::from(games), decimals)
        }
    };

    AggregateAverages {
        kills: mean(f64::from(totals.kills), 1),
        deaths: mean(f64::from(totals.deaths), 1),
        assists: mean(f64::from(totals.assists), 1),
        kda: round_to(kda(totals.kills, totals.deaths, totals.assists), 2),
        cs: mean(f64::from(totals.cs), 1),
        gold: mean(totals.gold as f64, 0),
        damage: mean(totals.damage as f64, 0),
        vision_score: mean(f64::from(totals.vision_score), 1),
        mvp_score: mean(totals.mvp_score, 2),
        win_rate: mean(f64::from(totals.wins) * 100.0, 1),
    }
}

pub fn lobby_response(summary: &MatchSummary, players: Vec<PlayerStat>) -> LobbyResponse {
    LobbyResponse {
        match_id: summary.match_id.clone(),
        game_creation: iso_timestamp(&summary.created_at),
        game_duration: summary.duration_seconds,
        game_mode: summary.mode.clone(),
        players,
    }
}

pub fn rolling_match(
    summary: &MatchSummary,
    players: Vec<PlayerStat>,
    requested_player: Option<PlayerStat>,
) -> RollingMatch {
    RollingMatch {
        match_id: summary.match_id.clone(),
        game_creation: iso_timestamp(&summary.created_at),
        game_duration: summary.duration_seconds,
        game_mode: summary.mode.clone(),
        win: requested_player.as_ref().is_some_and(|p| p.win),
        players,
        requested_player,
    }
}

pub fn rolling_response(
    identity: &ResolvedIdentity,
    rank: Option<&RankStanding>,
    matches: Vec<RollingMatch>,
    totals: &PlayerTotals,
) -> RollingResponse {
    RollingResponse {
        player: RollingPlayer {
            game_name: identity.game_name.clone(),
            tag_line: identity.tag_line.clone(),
            rank: RankView::from_standing(rank),
        },
        matches,
        averages: averages(totals),
        total_games: totals.games,
    }
}
