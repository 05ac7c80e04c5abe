//! # Lobby Stats
//!
//! Aggregates League of Legends ranked flex matches into per-player
//! statistics and an MVP ranking.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (identities, match payloads, ranks, player stats)
//! - **provider**: Match data provider trait and the Riot HTTP client
//! - **calculate**: Per-player derived metrics and MVP scoring
//! - **assemble**: Lobby ordering, averages and response shaping
//! - **aggregate**: Lobby and rolling views over a provider
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod aggregate;
pub mod api;
pub mod assemble;
pub mod calculate;
pub mod config;
pub mod models;
pub mod provider;

pub use models::*;
