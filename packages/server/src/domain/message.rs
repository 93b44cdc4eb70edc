//! Outbound messages pushed to connections.
//!
//! The hub treats these as opaque payloads; it only builds the two membership
//! events itself (`user_joined`, `user_left`).

use std::collections::BTreeMap;

use roomcast_shared::time::now_jst_rfc3339;
use serde::{Deserialize, Serialize};

use super::value_object::RoomName;

/// Message sent from the server to a client, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    UserJoined {
        message: String,
        timestamp: String,
        room: String,
        /// Member count of the room after the join
        connections: usize,
    },
    UserLeft {
        message: String,
        timestamp: String,
        room: String,
        /// Member count of the room after the leave
        connections: usize,
    },
    Chat {
        message: String,
        timestamp: String,
        room: String,
    },
    Pong {
        timestamp: String,
        original_timestamp: Option<String>,
    },
    Stats {
        total_connections: usize,
        rooms: BTreeMap<String, usize>,
        timestamp: String,
    },
    AdminBroadcast {
        message: String,
        timestamp: String,
    },
    Error {
        message: String,
        timestamp: String,
    },
    Echo {
        original: String,
        timestamp: String,
    },
    Notification {
        message: String,
        timestamp: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        counter: Option<u64>,
    },
}

impl ServerMessage {
    pub fn user_joined(room: &RoomName, connections: usize) -> Self {
        Self::UserJoined {
            message: "A user joined the room".to_string(),
            timestamp: now_jst_rfc3339(),
            room: room.to_string(),
            connections,
        }
    }

    pub fn user_left(room: &RoomName, connections: usize) -> Self {
        Self::UserLeft {
            message: "A user left the room".to_string(),
            timestamp: now_jst_rfc3339(),
            room: room.to_string(),
            connections,
        }
    }

    /// Chat message for `room`. Falls back to the current time when the
    /// client did not supply a timestamp.
    pub fn chat(room: &RoomName, message: String, timestamp: Option<String>) -> Self {
        Self::Chat {
            message,
            timestamp: timestamp.unwrap_or_else(now_jst_rfc3339),
            room: room.to_string(),
        }
    }

    pub fn pong(original_timestamp: Option<String>) -> Self {
        Self::Pong {
            timestamp: now_jst_rfc3339(),
            original_timestamp,
        }
    }

    pub fn admin_broadcast(message: String) -> Self {
        Self::AdminBroadcast {
            message,
            timestamp: now_jst_rfc3339(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            timestamp: now_jst_rfc3339(),
        }
    }

    pub fn echo(original: String) -> Self {
        Self::Echo {
            original,
            timestamp: now_jst_rfc3339(),
        }
    }

    pub fn notification(message: impl Into<String>, counter: Option<u64>) -> Self {
        Self::Notification {
            message: message.into(),
            timestamp: now_jst_rfc3339(),
            counter,
        }
    }
}
