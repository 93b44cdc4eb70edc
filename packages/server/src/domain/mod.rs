//! Domain layer for the broadcast hub.
//!
//! This module contains the types the hub reasons about, independent of
//! transport (WebSocket) and wire DTO concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod message;
pub mod value_object;

#[cfg(test)]
pub use entity::MockMessageSink;
pub use entity::{Connection, MessageSink};
pub use error::{SendError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use message::ServerMessage;
pub use value_object::{ConnectionId, RoomName};
