//! Scoring engine.
//!
//! Computes derived metrics from raw participant records:
//! - KDA with deaths floored at one
//! - Per-minute rates, zero for zero-length records
//! - The composite MVP score used to rank a lobby

pub mod player_stat;

pub use player_stat::{build_lobby_stat, build_player_stat};

use crate::models::ParticipantRecord;

/// MVP score weights.
pub mod weights {
    pub const KDA: f64 = 30.0;
    pub const DAMAGE_SHARE: f64 = 20.0;
    pub const GOLD_PER_MINUTE: f64 = 15.0;
    pub const VISION: f64 = 10.0;
    pub const KILL_PARTICIPATION: f64 = 25.0;
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// (kills + assists) / max(deaths, 1). Never infinite or NaN.
pub fn kda(kills: u32, deaths: u32, assists: u32) -> f64 {
    (f64::from(kills) + f64::from(assists)) / f64::from(deaths.max(1))
}

/// Rate per minute of play. A zero play time yields 0.
pub fn per_minute(total: u32, seconds_played: u32) -> f64 {
    if seconds_played == 0 {
        return 0.0;
    }
    f64::from(total) / (f64::from(seconds_played) / 60.0)
}

/// Composite MVP score, rounded to two decimals.
pub fn mvp_score(participant: &ParticipantRecord) -> f64 {
    let kda = kda(participant.kills, participant.deaths, participant.assists);
    let damage_share = participant.team_damage_percentage() * 100.0;
    let gold_per_minute = per_minute(participant.gold_earned, participant.time_played);
    let vision = f64::from(participant.vision_score);
    let kill_participation = participant.kill_participation() * 100.0;

    let score = kda * weights::KDA
        + damage_share * weights::DAMAGE_SHARE
        + (gold_per_minute / 10.0) * weights::GOLD_PER_MINUTE
        + vision * weights::VISION
        + kill_participation * weights::KILL_PARTICIPATION;

    round_to(score, 2)
}
