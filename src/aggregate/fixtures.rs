//! Shared builders for aggregator tests.

use std::sync::Arc;
use std::time::Duration;

use super::{AggregatorSettings, MatchAggregator};
use crate::models::ParticipantRecord;
use crate::provider::mock::MockProvider;

pub fn settings() -> AggregatorSettings {
    AggregatorSettings {
        queue_id: 440,
        queue_type: "RANKED_FLEX_SR".to_string(),
        rolling_match_count: 5,
        call_timeout: Duration::from_secs(5),
    }
}

pub fn aggregator(provider: MockProvider) -> (Arc<MockProvider>, MatchAggregator) {
    aggregator_with(provider, settings())
}

pub fn aggregator_with(
    provider: MockProvider,
    settings: AggregatorSettings,
) -> (Arc<MockProvider>, MatchAggregator) {
    let provider = Arc::new(provider);
    let aggregator = MatchAggregator::new(provider.clone(), settings);
    (provider, aggregator)
}

/// Ten participants `p0..p9`; higher index means more kills and a higher
/// score. `p0..p4` are the winning blue team.
pub fn ten_participants() -> Vec<ParticipantRecord> {
    (0..10)
        .map(|i| {
            let mut p = ParticipantRecord::sample(&format!("p{}", i), i, 2, 3);
            p.team_id = if i < 5 { 100 } else { 200 };
            p.win = i < 5;
            p
        })
        .collect()
}

/// A lobby where `puuid` has the given line and nine others fill the rest.
pub fn lobby_with(puuid: &str, kills: u32, deaths: u32, assists: u32, win: bool) -> Vec<ParticipantRecord> {
    let mut me = ParticipantRecord::sample(puuid, kills, deaths, assists);
    me.win = win;

    let mut lobby = vec![me];
    lobby.extend((1..10).map(|i| {
        let mut p = ParticipantRecord::sample(&format!("{}-other{}", puuid, i), i, 3, 3);
        p.win = (i < 5) == win;
        p
    }));
    lobby
}
