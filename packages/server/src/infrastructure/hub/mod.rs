//! Room-based broadcast hub.

mod broadcast;
mod state;

use std::collections::BTreeMap;

pub use broadcast::{BroadcastHub, DEFAULT_SEND_TIMEOUT, HubConfig};
pub use state::HubState;

use crate::domain::RoomName;

/// Point-in-time view of a single room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub room: RoomName,
    pub member_count: usize,
    /// Whether the room has ever been created. Rooms are never pruned, so an
    /// emptied room keeps `exists == true`.
    pub exists: bool,
}

/// Point-in-time view of the whole hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubStats {
    pub total_connections: usize,
    /// Member count per room, for every room ever created
    pub rooms: BTreeMap<String, usize>,
    pub timestamp: String,
}
