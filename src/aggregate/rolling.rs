//! Multi-match rolling view for a single player.

use tracing::{info, warn};

use super::{conceal_internal, validate_identities, AggregateError, MatchAggregator};
use crate::assemble::{self, RollingMatch, RollingResponse};
use crate::calculate::build_lobby_stat;
use crate::models::{PlayerIdentity, PlayerStat, PlayerTotals};

impl MatchAggregator {
    /// Summarize one player's most recent matches, newest first.
    ///
    /// Matches are fetched one after another in discovery order so the
    /// match list and the averages are deterministic.
    pub async fn aggregate_rolling(
        &self,
        players: &[PlayerIdentity],
    ) -> Result<RollingResponse, AggregateError> {
        conceal_internal("Rolling aggregation", self.rolling(players).await)
    }

    async fn rolling(&self, players: &[PlayerIdentity]) -> Result<RollingResponse, AggregateError> {
        let [player] = players else {
            return Err(AggregateError::BadRequest(
                "Please provide exactly one player for last 5 matches".to_string(),
            ));
        };
        validate_identities(players)?;

        let resolved = self.resolve(player).await?;

        let rank = self
            .timed(
                self.provider
                    .rank_standing(&resolved.puuid, &self.settings.queue_type),
            )
            .await?;

        let match_ids = self
            .recent_matches(&resolved.puuid, self.settings.rolling_match_count)
            .await?;
        info!("Rolling view for {}: {} matches", player, match_ids.len());

        let mut totals = PlayerTotals::default();
        let mut matches: Vec<RollingMatch> = Vec::with_capacity(match_ids.len());

        for match_id in &match_ids {
            let detail = self.fetch_match(match_id).await?;
            let summary = assemble::summarize(match_id, &detail.info)?;

            let lobby: Vec<PlayerStat> = detail
                .info
                .participants
                .iter()
                .map(build_lobby_stat)
                .collect();
            let lobby = assemble::rank_lobby(lobby);

            let requested = lobby.iter().find(|p| p.puuid == resolved.puuid).cloned();
            match &requested {
                Some(stat) => totals.add(stat),
                None => warn!("{} is not a participant of {}", player, match_id),
            }

            matches.push(assemble::rolling_match(&summary, lobby, requested));
        }

        Ok(assemble::rolling_response(
            &resolved,
            rank.as_ref(),
            matches,
            &totals,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{aggregator, aggregator_with, lobby_with, settings};
    use super::super::NO_MATCHES_MESSAGE;
    use super::*;
    use crate::models::{RankStanding, RankView};
    use crate::provider::mock::MockProvider;
    use pretty_assertions::assert_eq;

    fn rolling_provider() -> MockProvider {
        MockProvider::new()
            .with_account("Me", "TAG", "me")
            .with_rank("me", RankStanding::new("PLATINUM", "IV", 88))
            .with_match_ids("me", &["LA2_3", "LA2_2", "LA2_1"])
            .with_match("LA2_3", lobby_with("me", 10, 0, 5, true))
            .with_match("LA2_2", lobby_with("me", 0, 10, 5, false))
            .with_match("LA2_1", lobby_with("me", 5, 5, 5, true))
    }

    #[tokio::test]
    async fn test_rolling_happy_path() {
        let (provider, agg) = aggregator(rolling_provider());

        let resp = agg
            .aggregate_rolling(&[PlayerIdentity::new("Me", "TAG")])
            .await
            .unwrap();

        assert_eq!(resp.player.game_name, "Me");
        assert_eq!(resp.player.tag_line, "TAG");
        assert_eq!(
            resp.player.rank,
            RankView {
                tier: "PLATINUM".to_string(),
                division: "IV".to_string(),
                lp: 88,
            }
        );
        assert_eq!(resp.total_games, 3);

        let ids: Vec<&str> = resp.matches.iter().map(|m| m.match_id.as_str()).collect();
        assert_eq!(ids, vec!["LA2_3", "LA2_2", "LA2_1"]);

        let wins: Vec<bool> = resp.matches.iter().map(|m| m.win).collect();
        assert_eq!(wins, vec![true, false, true]);

        assert_eq!(resp.averages.kills, 5.0);
        assert_eq!(resp.averages.deaths, 5.0);
        assert_eq!(resp.averages.assists, 5.0);
        assert_eq!(resp.averages.win_rate, 66.7);
        // (15 + 15) / 15
        assert_eq!(resp.averages.kda, 2.0);

        assert!(provider.calls().contains(&"ids:me:440:5".to_string()));
    }

    #[tokio::test]
    async fn test_rolling_matches_fetched_in_order() {
        let (provider, agg) = aggregator(rolling_provider());

        agg.aggregate_rolling(&[PlayerIdentity::new("Me", "TAG")])
            .await
            .unwrap();

        let details: Vec<String> = provider
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("detail:"))
            .collect();
        assert_eq!(details, vec!["detail:LA2_3", "detail:LA2_2", "detail:LA2_1"]);

        let rank_calls = provider
            .calls()
            .iter()
            .filter(|c| c.starts_with("rank:"))
            .count();
        assert_eq!(rank_calls, 1);
    }

    #[tokio::test]
    async fn test_rolling_per_match_lobbies_ranked() {
        let (_, agg) = aggregator(rolling_provider());

        let resp = agg
            .aggregate_rolling(&[PlayerIdentity::new("Me", "TAG")])
            .await
            .unwrap();

        for m in &resp.matches {
            assert_eq!(m.players.len(), 10);
            let rankings: Vec<u32> = m.players.iter().map(|p| p.ranking).collect();
            assert_eq!(rankings, (1..=10).collect::<Vec<u32>>());
            assert!(m.players.iter().all(|p| p.rank.is_none()));

            let me = m.requested_player.as_ref().unwrap();
            assert_eq!(me.puuid, "me");
            let in_lobby = m.players.iter().find(|p| p.puuid == "me").unwrap();
            assert_eq!(in_lobby.ranking, me.ranking);
        }
    }

    #[tokio::test]
    async fn test_rolling_kda_from_summed_counters() {
        let provider = MockProvider::new()
            .with_account("Me", "TAG", "me")
            .with_match_ids("me", &["A", "B"])
            .with_match("A", lobby_with("me", 10, 0, 5, true))
            .with_match("B", lobby_with("me", 0, 10, 5, false));
        let (_, agg) = aggregator(provider);

        let resp = agg
            .aggregate_rolling(&[PlayerIdentity::new("Me", "TAG")])
            .await
            .unwrap();

        let per_match: Vec<f64> = resp
            .matches
            .iter()
            .map(|m| m.requested_player.as_ref().unwrap().kda)
            .collect();
        assert_eq!(per_match, vec![15.0, 0.5]);
        assert_eq!(resp.averages.kda, 2.0);
        assert_eq!(resp.averages.win_rate, 50.0);
        assert_eq!(resp.player.rank, RankView::unranked());
    }

    #[tokio::test]
    async fn test_rolling_requires_exactly_one_player() {
        let (provider, agg) = aggregator(rolling_provider());

        let err = agg
            .aggregate_rolling(&[
                PlayerIdentity::new("Me", "TAG"),
                PlayerIdentity::new("Friend", "TAG"),
            ])
            .await
            .unwrap_err();

        match err {
            AggregateError::BadRequest(msg) => assert!(msg.contains("exactly one player")),
            other => panic!("expected BadRequest, got {:?}", other),
        }
        assert!(provider.calls().is_empty());

        let err = agg.aggregate_rolling(&[]).await.unwrap_err();
        assert!(matches!(err, AggregateError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_rolling_no_matches() {
        let provider = MockProvider::new().with_account("Me", "TAG", "me");
        let (provider, agg) = aggregator(provider);

        let err = agg
            .aggregate_rolling(&[PlayerIdentity::new("Me", "TAG")])
            .await
            .unwrap_err();

        assert!(matches!(err, AggregateError::NotFound(ref m) if m == NO_MATCHES_MESSAGE));
        assert!(!provider.calls().iter().any(|c| c.starts_with("detail:")));
    }

    #[tokio::test]
    async fn test_rolling_player_absent_from_a_match() {
        let provider = MockProvider::new()
            .with_account("Me", "TAG", "me")
            .with_match_ids("me", &["A", "B"])
            .with_match("A", lobby_with("me", 4, 2, 6, true))
            .with_match("B", lobby_with("someone-else", 9, 1, 1, true));
        let (_, agg) = aggregator(provider);

        let resp = agg
            .aggregate_rolling(&[PlayerIdentity::new("Me", "TAG")])
            .await
            .unwrap();

        assert_eq!(resp.matches.len(), 2);
        assert_eq!(resp.total_games, 1);
        assert!(resp.matches[1].requested_player.is_none());
        assert!(!resp.matches[1].win);
        assert_eq!(resp.averages.kills, 4.0);
    }

    #[tokio::test]
    async fn test_rolling_respects_configured_count() {
        let mut two = settings();
        two.rolling_match_count = 2;
        let (provider, agg) = aggregator_with(rolling_provider(), two);

        let resp = agg
            .aggregate_rolling(&[PlayerIdentity::new("Me", "TAG")])
            .await
            .unwrap();

        assert_eq!(resp.total_games, 2);
        assert!(provider.calls().contains(&"ids:me:440:2".to_string()));
    }

    #[tokio::test]
    async fn test_rolling_unknown_player() {
        let (_, agg) = aggregator(rolling_provider());

        let err = agg
            .aggregate_rolling(&[PlayerIdentity::new("Faker", "KR1")])
            .await
            .unwrap_err();

        assert!(matches!(err, AggregateError::NotFound(ref m) if m.contains("Faker#KR1")));
    }

    #[tokio::test]
    async fn test_rolling_missing_match_fails_whole_request() {
        let provider = MockProvider::new()
            .with_account("Me", "TAG", "me")
            .with_match_ids("me", &["A", "GONE"])
            .with_match("A", lobby_with("me", 4, 2, 6, true));
        let (_, agg) = aggregator(provider);

        let err = agg
            .aggregate_rolling(&[PlayerIdentity::new("Me", "TAG")])
            .await
            .unwrap_err();

        assert!(matches!(err, AggregateError::NotFound(ref m) if m.contains("GONE")));
    }
}
