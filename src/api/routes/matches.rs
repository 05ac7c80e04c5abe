use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::assemble::{LobbyResponse, RollingResponse};
use crate::models::PlayerIdentity;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub players: Vec<PlayerIdentity>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
    pub status: &'static str,
}

pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "LoL Dashboard API",
        status: "running",
    })
}

/// Last match of the first player, with all ten participants ranked.
pub async fn match_stats(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<LobbyResponse>, ApiError> {
    info!("POST /api/match-stats ({} players)", request.players.len());
    let response = state.aggregator.aggregate_lobby(&request.players).await?;
    Ok(Json(response))
}

/// Recent matches and averages for exactly one player.
pub async fn last_matches(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<RollingResponse>, ApiError> {
    info!("POST /api/last-5-matches ({} players)", request.players.len());
    let response = state.aggregator.aggregate_rolling(&request.players).await?;
    Ok(Json(response))
}
