//! Infrastructure layer: the in-memory hub, sinks and wire DTOs.

pub mod dto;
pub mod hub;
pub mod sink;

pub use hub::{BroadcastHub, HubConfig, HubStats, RoomInfo};
pub use sink::{ChannelSink, DEFAULT_OUTBOUND_BUFFER};
