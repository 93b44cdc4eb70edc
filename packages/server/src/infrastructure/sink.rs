//! Channel-backed message sink.
//!
//! Each WebSocket connection owns a writer task draining an mpsc receiver;
//! the hub only ever sees the sending half through [`ChannelSink`].

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use crate::domain::{MessageSink, SendError, ServerMessage};

/// Default number of messages queued for one connection before sends wait
pub const DEFAULT_OUTBOUND_BUFFER: usize = 64;

/// [`MessageSink`] that forwards messages into a bounded mpsc channel.
///
/// A send waits while the queue is full, so a peer that stops reading is
/// caught by the hub's per-send timeout.
pub struct ChannelSink {
    sender: Sender<ServerMessage>,
}

impl ChannelSink {
    pub fn new(sender: Sender<ServerMessage>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl MessageSink for ChannelSink {
    async fn send(&self, message: &ServerMessage) -> Result<(), SendError> {
        // Fails only once the receiver (the socket writer) has been dropped.
        self.sender
            .send(message.clone())
            .await
            .map_err(|_| SendError::Closed)
    }
}
