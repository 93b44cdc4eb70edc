//! HTTP API response DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::infrastructure::hub::{HubStats, RoomInfo};

/// Response of `GET /rooms/{room}/info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomInfoDto {
    pub room: String,
    /// Current member count
    pub connections: usize,
    /// Whether the room has been created
    pub active: bool,
}

impl From<RoomInfo> for RoomInfoDto {
    fn from(info: RoomInfo) -> Self {
        Self {
            room: info.room.into_string(),
            connections: info.member_count,
            active: info.exists,
        }
    }
}

/// Response of `GET /stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsDto {
    pub total_connections: usize,
    pub rooms: BTreeMap<String, usize>,
    pub timestamp: String, // ISO 8601
}

impl From<HubStats> for StatsDto {
    fn from(stats: HubStats) -> Self {
        Self {
            total_connections: stats.total_connections,
            rooms: stats.rooms,
            timestamp: stats.timestamp,
        }
    }
}
