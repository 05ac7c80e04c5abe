//! Match data provider abstraction.
//!
//! The aggregation pipeline talks to the remote match service only through
//! [`MatchDataProvider`]. The production implementation is [`riot::RiotClient`];
//! tests substitute an in-memory provider.

pub mod riot;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{MatchDetail, RankStanding};

pub use riot::{RiotClient, RiotClientConfig};

/// Errors that can occur talking to the provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("API key is not a valid header value")]
    InvalidCredential,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Unexpected payload: {0}")]
    Decode(String),

    #[error("Timeout after {0:?}")]
    Timeout(std::time::Duration),
}

/// Read-only access to identities, ranked standings and matches.
#[async_trait]
pub trait MatchDataProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Resolve a Riot ID to its PUUID. `NotFound` if no such account.
    async fn resolve_identity(&self, game_name: &str, tag_line: &str)
        -> Result<String, ProviderError>;

    /// Standing in one ranked queue. `None` when unranked in that queue.
    async fn rank_standing(
        &self,
        puuid: &str,
        queue_type: &str,
    ) -> Result<Option<RankStanding>, ProviderError>;

    /// Up to `count` most recent match ids in `queue_id`, newest first.
    async fn recent_match_ids(
        &self,
        puuid: &str,
        queue_id: u32,
        count: u32,
    ) -> Result<Vec<String>, ProviderError>;

    /// Full match payload. `NotFound` if the id is unknown.
    async fn match_detail(&self, match_id: &str) -> Result<MatchDetail, ProviderError>;
}
