//! Single-match lobby view.

use futures::future::try_join_all;
use tracing::info;

use super::{conceal_internal, validate_identities, AggregateError, MatchAggregator};
use crate::assemble::{self, LobbyResponse};
use crate::calculate::build_player_stat;
use crate::models::{ParticipantRecord, PlayerIdentity, PlayerStat, RankStanding};

impl MatchAggregator {
    /// Rank every participant of the first player's most recent match.
    ///
    /// All requested identities must resolve; only the first one is used to
    /// discover the match.
    pub async fn aggregate_lobby(
        &self,
        players: &[PlayerIdentity],
    ) -> Result<LobbyResponse, AggregateError> {
        conceal_internal("Lobby aggregation", self.lobby(players).await)
    }

    async fn lobby(&self, players: &[PlayerIdentity]) -> Result<LobbyResponse, AggregateError> {
        if players.is_empty() {
            return Err(AggregateError::BadRequest(
                "Please provide at least one player".to_string(),
            ));
        }
        validate_identities(players)?;

        let mut resolved = Vec::with_capacity(players.len());
        for player in players {
            resolved.push(self.resolve(player).await?);
        }
        let anchor = &resolved[0];

        let match_ids = self.recent_matches(&anchor.puuid, 1).await?;
        let match_id = &match_ids[0];
        info!("Lobby view for {}#{}: match {}", anchor.game_name, anchor.tag_line, match_id);

        let detail = self.fetch_match(match_id).await?;
        let summary = assemble::summarize(match_id, &detail.info)?;

        let participants = &detail.info.participants;
        let ranks = self.lobby_ranks(participants).await?;

        let stats: Vec<PlayerStat> = participants
            .iter()
            .zip(ranks.iter())
            .map(|(participant, rank)| build_player_stat(participant, rank.as_ref()))
            .collect();

        Ok(assemble::lobby_response(&summary, assemble::rank_lobby(stats)))
    }

    /// Look up every participant's rank concurrently.
    ///
    /// `result[i]` is the standing of `participants[i]`. Dropping the returned
    /// future cancels lookups still in flight, and the first failure cancels
    /// the rest.
    async fn lobby_ranks(
        &self,
        participants: &[ParticipantRecord],
    ) -> Result<Vec<Option<RankStanding>>, AggregateError> {
        let queue_type = self.settings.queue_type.as_str();
        let lookups = participants.iter().map(|p| {
            self.timed(self.provider.rank_standing(&p.puuid, queue_type))
        });

        let ranks = try_join_all(lookups).await?;
        info!(
            "Fetched {} ranks ({} unranked)",
            ranks.len(),
            ranks.iter().filter(|r| r.is_none()).count()
        );
        Ok(ranks)
    }
}
