//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomName,
    infrastructure::dto::http::{RoomInfoDto, StatsDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Connection statistics
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsDto> {
    Json(state.hub.stats().await.into())
}

/// Information about a single room
pub async fn get_room_info(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomInfoDto>, StatusCode> {
    let room = match RoomName::try_from(room) {
        Ok(room) => room,
        Err(e) => {
            tracing::warn!("Invalid room name: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(Json(state.hub.room_info(&room).await.into()))
}
