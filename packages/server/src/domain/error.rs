//! Domain layer error definitions.

use std::time::Duration;

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomName validation error
    #[error("RoomName cannot be empty")]
    RoomNameEmpty,

    /// RoomName too long error
    #[error("RoomName cannot exceed {max} bytes (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },
}

/// Delivery to a single connection failed.
///
/// This is the only error the hub ever surfaces, and only from a direct
/// `send_to`. Broadcasts turn it into cleanup instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendError {
    /// The peer is gone (socket closed, writer task finished)
    #[error("connection is closed")]
    Closed,

    /// The delivery attempt did not complete within the per-send timeout
    #[error("send timed out after {0:?}")]
    Timeout(Duration),

    /// The socket write failed, or the message could not be serialized
    #[error("transport error: {0}")]
    Transport(String),
}
