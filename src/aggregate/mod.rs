//! Match aggregation.
//!
//! Orchestrates provider calls into the two dashboard views:
//! - [`MatchAggregator::aggregate_lobby`]: every participant of one recent
//!   match, with concurrently fetched ranks
//! - [`MatchAggregator::aggregate_rolling`]: one player's recent matches,
//!   processed in order, with per-game averages
//!
//! Errors are classified once at the public boundary. Not-found and
//! bad-request failures keep their message; anything else is logged and
//! replaced by a generic internal error.

mod lobby;
mod rolling;

#[cfg(test)]
mod fixtures;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error};

use crate::assemble::AssembleError;
use crate::config::RiotConfig;
use crate::models::{MatchDetail, PlayerIdentity, ResolvedIdentity};
use crate::provider::{MatchDataProvider, ProviderError};

/// Message returned when no qualifying matches exist.
pub const NO_MATCHES_MESSAGE: &str = "No recent ranked flex matches found";

/// Message returned for every unexpected failure.
pub const INTERNAL_MESSAGE: &str = "Internal error while aggregating match data";

/// Aggregation errors, by response class.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl From<ProviderError> for AggregateError {
    fn from(e: ProviderError) -> Self {
        AggregateError::Internal(e.to_string())
    }
}

impl From<AssembleError> for AggregateError {
    fn from(e: AssembleError) -> Self {
        AggregateError::Internal(e.to_string())
    }
}

/// Queue selection and call limits.
#[derive(Debug, Clone)]
pub struct AggregatorSettings {
    /// Match-v5 queue filter
    pub queue_id: u32,

    /// League-v4 queue type for rank lookups
    pub queue_type: String,

    /// Matches fetched by the rolling view
    pub rolling_match_count: u32,

    /// Upper bound on any single provider call
    pub call_timeout: Duration,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self::from_config(&RiotConfig::default())
    }
}

impl AggregatorSettings {
    pub fn from_config(config: &RiotConfig) -> Self {
        Self {
            queue_id: config.queue_id,
            queue_type: config.queue_type.clone(),
            rolling_match_count: config.rolling_match_count,
            call_timeout: Duration::from_secs(config.timeout_seconds),
        }
    }
}

/// Stateless pipeline over a shared provider.
pub struct MatchAggregator {
    provider: Arc<dyn MatchDataProvider>,
    settings: AggregatorSettings,
}

impl MatchAggregator {
    pub fn new(provider: Arc<dyn MatchDataProvider>, settings: AggregatorSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &AggregatorSettings {
        &self.settings
    }

    /// Run one provider call under the configured timeout.
    async fn timed<T, F>(&self, call: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        let limit = self.settings.call_timeout;
        tokio::time::timeout(limit, call)
            .await
            .unwrap_or(Err(ProviderError::Timeout(limit)))
    }

    async fn resolve(&self, identity: &PlayerIdentity) -> Result<ResolvedIdentity, AggregateError> {
        debug!("Resolving {} via {}", identity, self.provider.name());

        let call = self
            .provider
            .resolve_identity(&identity.game_name, &identity.tag_line);
        match self.timed(call).await {
            Ok(puuid) => Ok(ResolvedIdentity::new(puuid, identity)),
            Err(ProviderError::NotFound(_)) => Err(AggregateError::NotFound(format!(
                "Player {} not found",
                identity
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Most recent match ids in the tracked queue. Empty is not-found.
    async fn recent_matches(&self, puuid: &str, count: u32) -> Result<Vec<String>, AggregateError> {
        let call = self
            .provider
            .recent_match_ids(puuid, self.settings.queue_id, count);
        match self.timed(call).await {
            Ok(ids) if !ids.is_empty() => Ok(ids),
            Ok(_) | Err(ProviderError::NotFound(_)) => {
                Err(AggregateError::NotFound(NO_MATCHES_MESSAGE.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_match(&self, match_id: &str) -> Result<MatchDetail, AggregateError> {
        debug!("Fetching match {}", match_id);

        match self.timed(self.provider.match_detail(match_id)).await {
            Ok(detail) => Ok(detail),
            Err(ProviderError::NotFound(_)) => Err(AggregateError::NotFound(format!(
                "Match {} details not found",
                match_id
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

/// Reject blank Riot IDs before any provider call.
fn validate_identities(players: &[PlayerIdentity]) -> Result<(), AggregateError> {
    if let Some(bad) = players.iter().find(|p| !p.is_complete()) {
        return Err(AggregateError::BadRequest(format!(
            "Invalid Riot ID '{}': both game name and tag line are required",
            bad
        )));
    }
    Ok(())
}

/// Replace internal failure details with the generic message, logging them.
fn conceal_internal<T>(operation: &str, result: Result<T, AggregateError>) -> Result<T, AggregateError> {
    result.map_err(|e| match e {
        AggregateError::Internal(detail) => {
            error!("{} failed: {}", operation, detail);
            AggregateError::Internal(INTERNAL_MESSAGE.to_string())
        }
        other => other,
    })
}
