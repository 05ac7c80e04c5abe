//! Riot Games API client.
//!
//! Account lookups and match-v5 live on the regional host; league entries
//! live on the platform host. Every request carries the API key in the
//! `X-Riot-Token` header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::{MatchDataProvider, ProviderError};
use crate::config::RiotConfig;
use crate::models::{MatchDetail, RankStanding};

const RIOT_TOKEN_HEADER: &str = "x-riot-token";

/// Configuration for the Riot client.
#[derive(Debug, Clone)]
pub struct RiotClientConfig {
    pub api_key: String,

    /// Platform host, e.g. `https://la2.api.riotgames.com`
    pub platform_url: Url,

    /// Regional host, e.g. `https://americas.api.riotgames.com`
    pub region_url: Url,

    /// Per-request timeout
    pub timeout: Duration,

    pub user_agent: String,
}

impl RiotClientConfig {
    pub fn from_config(config: &RiotConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            api_key: config.api_key.clone(),
            platform_url: parse_base(&config.platform_url)?,
            region_url: parse_base(&config.region_url)?,
            timeout: Duration::from_secs(config.timeout_seconds),
            user_agent: format!("lobby-stats/{}", env!("CARGO_PKG_VERSION")),
        })
    }
}

fn parse_base(raw: &str) -> Result<Url, ProviderError> {
    Url::parse(raw).map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", raw, e)))
}

/// `GET /riot/account/v1/accounts/by-riot-id/{name}/{tag}`
#[derive(Debug, Deserialize)]
struct AccountDto {
    puuid: String,
}

/// One element of `GET /lol/league/v4/entries/by-puuid/{puuid}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: i32,
}

/// Pick the entry for `queue_type`, ignoring the account's other queues.
pub fn standing_for_queue(entries: &[LeagueEntryDto], queue_type: &str) -> Option<RankStanding> {
    entries
        .iter()
        .find(|e| e.queue_type == queue_type)
        .map(|e| RankStanding::new(e.tier.clone(), e.rank.clone(), e.league_points))
}

/// HTTP client for the Riot API.
pub struct RiotClient {
    client: Client,
    platform_url: Url,
    region_url: Url,
}

impl RiotClient {
    /// Create a client. The underlying connection pool is shared by clones
    /// of the inner `reqwest::Client` and is safe for concurrent use.
    pub fn new(config: RiotClientConfig) -> Result<Self, ProviderError> {
        let mut token =
            HeaderValue::from_str(&config.api_key).map_err(|_| ProviderError::InvalidCredential)?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(RIOT_TOKEN_HEADER), token);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("lobby-stats")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            platform_url: config.platform_url,
            region_url: config.region_url,
        })
    }

    /// Append path segments to a base URL, percent-encoding each one.
    fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::InvalidUrl(base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ProviderError> {
        debug!("GET {}", url.path());

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(url.path().to_string()));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(1);

            return Err(ProviderError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            return Err(ProviderError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Decode(format!("{}: {}", url.path(), e)))
    }
}

#[async_trait]
impl MatchDataProvider for RiotClient {
    fn name(&self) -> &'static str {
        "riot"
    }

    async fn resolve_identity(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<String, ProviderError> {
        let url = Self::endpoint(
            &self.region_url,
            &["riot", "account", "v1", "accounts", "by-riot-id", game_name, tag_line],
        )?;
        let account: AccountDto = self.get_json(url).await?;
        Ok(account.puuid)
    }

    async fn rank_standing(
        &self,
        puuid: &str,
        queue_type: &str,
    ) -> Result<Option<RankStanding>, ProviderError> {
        let url = Self::endpoint(
            &self.platform_url,
            &["lol", "league", "v4", "entries", "by-puuid", puuid],
        )?;

        match self.get_json::<Vec<LeagueEntryDto>>(url).await {
            Ok(entries) => Ok(standing_for_queue(&entries, queue_type)),
            // Failed standing lookups read as unranked
            Err(e @ ProviderError::NotFound(_))
            | Err(e @ ProviderError::HttpStatus { .. })
            | Err(e @ ProviderError::RateLimited { .. }) => {
                warn!("Rank lookup for {} treated as unranked: {}", puuid, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn recent_match_ids(
        &self,
        puuid: &str,
        queue_id: u32,
        count: u32,
    ) -> Result<Vec<String>, ProviderError> {
        let mut url = Self::endpoint(
            &self.region_url,
            &["lol", "match", "v5", "matches", "by-puuid", puuid, "ids"],
        )?;
        url.query_pairs_mut()
            .append_pair("queue", &queue_id.to_string())
            .append_pair("count", &count.to_string());

        self.get_json(url).await
    }

    async fn match_detail(&self, match_id: &str) -> Result<MatchDetail, ProviderError> {
        let url = Self::endpoint(&self.region_url, &["lol", "match", "v5", "matches", match_id])?;
        self.get_json(url).await
    }
}
