//! Core domain entities for the broadcast hub.

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use async_trait::async_trait;

use super::{
    error::SendError, factory::ConnectionIdFactory, message::ServerMessage,
    value_object::ConnectionId,
};

/// Outbound half of a live peer.
///
/// The hub never reads from a peer; it only needs to hand it a message and
/// learn whether that failed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Make one delivery attempt.
    async fn send(&self, message: &ServerMessage) -> Result<(), SendError>;
}

/// Handle to a single bidirectional peer.
///
/// Cloning is cheap and every clone refers to the same peer. Equality and
/// hashing only look at the id.
#[derive(Clone)]
pub struct Connection {
    id: ConnectionId,
    sink: Arc<dyn MessageSink>,
}

impl Connection {
    /// Create a connection with a freshly generated id.
    pub fn new(sink: Arc<dyn MessageSink>) -> Self {
        Self::with_id(ConnectionIdFactory::generate(), sink)
    }

    /// Create a connection with a known id.
    pub fn with_id(id: ConnectionId, sink: Arc<dyn MessageSink>) -> Self {
        Self { id, sink }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Deliver `message` to the peer. No retry, no timeout.
    pub async fn send(&self, message: &ServerMessage) -> Result<(), SendError> {
        self.sink.send(message).await
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Connection {}

impl Hash for Connection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection").field("id", &self.id).finish()
    }
}
