//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Environment variable that overrides `riot.api_key`.
pub const API_KEY_ENV: &str = "RIOT_API_KEY";

/// Largest page the match-v5 ids endpoint accepts.
pub const MAX_MATCH_COUNT: u32 = 100;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Riot API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiotConfig {
    /// API key sent as `X-Riot-Token`. Prefer the `RIOT_API_KEY` env var.
    #[serde(default)]
    pub api_key: String,

    /// Platform host (league entries)
    #[serde(default = "default_platform_url")]
    pub platform_url: String,

    /// Regional host (accounts, matches)
    #[serde(default = "default_region_url")]
    pub region_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Match-v5 queue filter (440 = ranked flex 5v5)
    #[serde(default = "default_queue_id")]
    pub queue_id: u32,

    /// League-v4 queue type matching `queue_id`
    #[serde(default = "default_queue_type")]
    pub queue_type: String,

    /// Matches averaged by the recent-matches view
    #[serde(default = "default_rolling_match_count")]
    pub rolling_match_count: u32,
}

fn default_platform_url() -> String {
    "https://la2.api.riotgames.com".to_string()
}

fn default_region_url() -> String {
    "https://americas.api.riotgames.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_queue_id() -> u32 {
    440
}

fn default_queue_type() -> String {
    "RANKED_FLEX_SR".to_string()
}

fn default_rolling_match_count() -> u32 {
    5
}

impl Default for RiotConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            platform_url: default_platform_url(),
            region_url: default_region_url(),
            timeout_seconds: default_timeout(),
            queue_id: default_queue_id(),
            queue_type: default_queue_type(),
            rolling_match_count: default_rolling_match_count(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub riot: RiotConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            riot: RiotConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, else defaults; then apply env overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            AppConfig::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.apply_api_key(key);
        }

        Ok(config)
    }

    /// Override the API key. Blank values are ignored.
    pub fn apply_api_key(&mut self, key: String) {
        let key = key.trim();
        if !key.is_empty() {
            self.riot.api_key = key.to_string();
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.riot.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "Riot timeout must be greater than 0".to_string(),
            ));
        }

        if self.riot.rolling_match_count == 0 || self.riot.rolling_match_count > MAX_MATCH_COUNT {
            return Err(ConfigError::ValidationError(format!(
                "Rolling match count must be between 1 and {}",
                MAX_MATCH_COUNT
            )));
        }

        for (name, raw) in [
            ("platform_url", &self.riot.platform_url),
            ("region_url", &self.riot.region_url),
        ] {
            Url::parse(raw).map_err(|e| {
                ConfigError::ValidationError(format!("riot.{} is not a URL: {}", name, e))
            })?;
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Checks that only matter once we actually call the provider.
    pub fn validate_credentials(&self) -> Result<(), ConfigError> {
        if self.riot.api_key.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "No Riot API key configured (set {} or riot.api_key)",
                API_KEY_ENV
            )));
        }
        Ok(())
    }
}
