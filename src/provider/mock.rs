//! In-memory provider for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{MatchDataProvider, ProviderError};
use crate::models::{MatchDetail, MatchInfo, ParticipantRecord, RankStanding};

/// Canned provider with call recording.
#[derive(Default)]
pub struct MockProvider {
    accounts: HashMap<(String, String), String>,
    ranks: HashMap<String, RankStanding>,
    match_ids: HashMap<String, Vec<String>>,
    matches: HashMap<String, MatchDetail>,
    failing_ranks: Vec<String>,
    rank_delay: Duration,
    rank_delays: HashMap<String, Duration>,
    detail_delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, game_name: &str, tag_line: &str, puuid: &str) -> Self {
        self.accounts.insert(
            (game_name.to_string(), tag_line.to_string()),
            puuid.to_string(),
        );
        self
    }

    pub fn with_rank(mut self, puuid: &str, standing: RankStanding) -> Self {
        self.ranks.insert(puuid.to_string(), standing);
        self
    }

    /// Make the standing lookup for `puuid` fail at the transport level.
    pub fn with_failing_rank(mut self, puuid: &str) -> Self {
        self.failing_ranks.push(puuid.to_string());
        self
    }

    pub fn with_match_ids(mut self, puuid: &str, ids: &[&str]) -> Self {
        self.match_ids
            .insert(puuid.to_string(), ids.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_match(mut self, match_id: &str, participants: Vec<ParticipantRecord>) -> Self {
        self.matches.insert(
            match_id.to_string(),
            MatchDetail {
                info: MatchInfo {
                    game_creation: 1_700_000_000_000,
                    game_duration: 1_800,
                    game_mode: "CLASSIC".to_string(),
                    participants,
                },
            },
        );
        self
    }

    pub fn with_rank_delay(mut self, delay: Duration) -> Self {
        self.rank_delay = delay;
        self
    }

    /// Delay the standing lookup for one player, overriding `with_rank_delay`.
    pub fn with_rank_delay_for(mut self, puuid: &str, delay: Duration) -> Self {
        self.rank_delays.insert(puuid.to_string(), delay);
        self
    }

    pub fn with_detail_delay(mut self, delay: Duration) -> Self {
        self.detail_delay = delay;
        self
    }

    /// Highest number of standing lookups observed running at once.
    pub fn max_concurrent_rank_lookups(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Provider calls in the order they were issued, e.g. `"detail:LA2_1"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MatchDataProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn resolve_identity(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<String, ProviderError> {
        self.record(format!("account:{}#{}", game_name, tag_line));
        self.accounts
            .get(&(game_name.to_string(), tag_line.to_string()))
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(format!("{}#{}", game_name, tag_line)))
    }

    async fn rank_standing(
        &self,
        puuid: &str,
        _queue_type: &str,
    ) -> Result<Option<RankStanding>, ProviderError> {
        self.record(format!("rank:{}", puuid));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let delay = self.rank_delays.get(puuid).copied().unwrap_or(self.rank_delay);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_ranks.iter().any(|p| p == puuid) {
            return Err(ProviderError::Decode("connection reset".to_string()));
        }
        Ok(self.ranks.get(puuid).cloned())
    }

    async fn recent_match_ids(
        &self,
        puuid: &str,
        queue_id: u32,
        count: u32,
    ) -> Result<Vec<String>, ProviderError> {
        self.record(format!("ids:{}:{}:{}", puuid, queue_id, count));
        let mut ids = self.match_ids.get(puuid).cloned().unwrap_or_default();
        ids.truncate(count as usize);
        Ok(ids)
    }

    async fn match_detail(&self, match_id: &str) -> Result<MatchDetail, ProviderError> {
        self.record(format!("detail:{}", match_id));
        if !self.detail_delay.is_zero() {
            tokio::time::sleep(self.detail_delay).await;
        }
        self.matches
            .get(match_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(match_id.to_string()))
    }
}
