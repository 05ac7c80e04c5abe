//! Participant stat builder.

use super::{kda, mvp_score, per_minute, round_to};
use crate::models::{ParticipantRecord, PlayerStat, RankStanding, RankView};

/// Build the lobby-view line for a participant, with its rank (or the
/// unranked placeholder when `rank` is `None`).
pub fn build_player_stat(participant: &ParticipantRecord, rank: Option<&RankStanding>) -> PlayerStat {
    PlayerStat {
        rank: Some(RankView::from_standing(rank)),
        ..build_lobby_stat(participant)
    }
}

/// Build a participant line without rank information.
pub fn build_lobby_stat(participant: &ParticipantRecord) -> PlayerStat {
    let p = participant;

    PlayerStat {
        puuid: p.puuid.clone(),
        game_name: p.display_name(),
        tag_line: p.riot_id_tag_line.clone().unwrap_or_default(),
        champion: p.champion_name.clone(),
        kills: p.kills,
        deaths: p.deaths,
        assists: p.assists,
        kda: round_to(kda(p.kills, p.deaths, p.assists), 2),
        cs: p.total_minions_killed.saturating_add(p.neutral_minions_killed),
        gold: p.gold_earned,
        damage: p.total_damage_dealt_to_champions,
        damage_taken: p.total_damage_taken,
        vision_score: p.vision_score,
        items: p.items(),
        win: p.win,
        mvp_score: mvp_score(p),
        gold_per_minute: round_to(per_minute(p.gold_earned, p.time_played), 2),
        damage_per_minute: round_to(
            per_minute(p.total_damage_dealt_to_champions, p.time_played),
            2,
        ),
        kill_participation: round_to(p.kill_participation() * 100.0, 1),
        team_id: p.team_id,
        rank: None,
        ranking: 0,
    }
}
