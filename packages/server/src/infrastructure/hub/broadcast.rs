//! The broadcast hub.
//!
//! Owns the membership index and fans messages out to connections. Every
//! fan-out follows the same shape:
//!
//! 1. snapshot the targets while holding the membership lock,
//! 2. release the lock and attempt every delivery concurrently,
//! 3. call [`BroadcastHub::leave`] once per connection whose delivery failed.
//!
//! No send is ever performed while the lock is held.

use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use futures_util::future::join_all;
use roomcast_shared::time::now_jst_rfc3339;
use tokio::sync::{Mutex, mpsc};

use crate::domain::{Connection, ConnectionId, RoomName, SendError, ServerMessage};

use super::{HubStats, RoomInfo, state::HubState};

/// Default upper bound for a single delivery attempt
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Hub settings
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Upper bound for a single delivery attempt. An elapsed timeout is
    /// treated like any other send failure.
    pub send_timeout: Duration,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }
}

/// A room that lost a member and still has members to tell about it.
struct Departure {
    room: RoomName,
    remaining: usize,
}

struct HubInner {
    state: Mutex<HubState>,
    config: HubConfig,
    departures: mpsc::UnboundedSender<Departure>,
}

/// Shared handle to the hub. Clones refer to the same hub.
#[derive(Clone)]
pub struct BroadcastHub {
    inner: Arc<HubInner>,
}

impl BroadcastHub {
    /// Create an empty hub.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime: the task that delivers
    /// `user_left` notifications is spawned here. It stops once every handle
    /// to the hub has been dropped.
    pub fn new(config: HubConfig) -> Self {
        let (departures, departures_rx) = mpsc::unbounded_channel();
        let inner = Arc::new(HubInner {
            state: Mutex::new(HubState::new()),
            config,
            departures,
        });
        tokio::spawn(notify_departures(Arc::downgrade(&inner), departures_rx));
        Self { inner }
    }

    /// Add `connection` to the registry and to `room`, then tell the other
    /// members of `room` about it.
    pub async fn join(&self, connection: Connection, room: RoomName) {
        let connection_id = connection.id();
        let connections = {
            let mut state = self.inner.state.lock().await;
            state.insert(connection, &room)
        };
        tracing::info!(
            "Connection '{}' joined room '{}' ({} member(s))",
            connection_id,
            room,
            connections
        );

        let joined = ServerMessage::user_joined(&room, connections);
        self.broadcast_to_room(&room, &joined, Some(&connection_id))
            .await;
    }

    /// Remove the connection from the registry and from every room.
    ///
    /// Untracked ids are a no-op. Rooms that still have members get a
    /// `user_left` event, delivered in the background: this call never waits
    /// for it.
    pub async fn leave(&self, connection_id: &ConnectionId) {
        let changed = {
            let mut state = self.inner.state.lock().await;
            state.remove(connection_id)
        };
        if changed.is_empty() {
            tracing::debug!("Connection '{}' is not tracked, nothing to leave", connection_id);
            return;
        }

        for (room, remaining) in changed {
            tracing::info!(
                "Connection '{}' left room '{}' ({} member(s) remaining)",
                connection_id,
                room,
                remaining
            );
            if remaining == 0 {
                continue;
            }
            if self
                .inner
                .departures
                .send(Departure { room, remaining })
                .is_err()
            {
                tracing::warn!("Departure notifier is gone, dropping user_left event");
            }
        }
    }

    /// Make exactly one delivery attempt to `connection`.
    ///
    /// On failure the connection is removed via [`leave`](Self::leave) before
    /// the error is returned, so callers never clean up themselves.
    pub async fn send_to(
        &self,
        connection: &Connection,
        message: &ServerMessage,
    ) -> Result<(), SendError> {
        if let Err(e) = self.deliver(connection, message).await {
            tracing::warn!("Failed to send to connection '{}': {}", connection.id(), e);
            self.leave(&connection.id()).await;
            return Err(e);
        }
        Ok(())
    }

    /// Deliver `message` to every member of `room` except `exclude`.
    ///
    /// Unknown rooms are a no-op. Failed members are removed after the whole
    /// fan-out has been attempted.
    pub async fn broadcast_to_room(
        &self,
        room: &RoomName,
        message: &ServerMessage,
        exclude: Option<&ConnectionId>,
    ) {
        let targets = self.inner.state.lock().await.room_members(room, exclude);
        if targets.is_empty() {
            return;
        }
        tracing::debug!("Broadcasting to {} member(s) of room '{}'", targets.len(), room);
        self.fan_out(targets, message).await;
    }

    /// Deliver `message` to every tracked connection.
    pub async fn broadcast_to_all(&self, message: &ServerMessage) {
        let targets = self.inner.state.lock().await.connections();
        if targets.is_empty() {
            return;
        }
        tracing::debug!("Broadcasting to all {} connection(s)", targets.len());
        self.fan_out(targets, message).await;
    }

    pub async fn room_info(&self, room: &RoomName) -> RoomInfo {
        self.inner.state.lock().await.room_info(room)
    }

    pub async fn stats(&self) -> HubStats {
        let state = self.inner.state.lock().await;
        HubStats {
            total_connections: state.connection_count(),
            rooms: state.room_counts(),
            timestamp: now_jst_rfc3339(),
        }
    }

    /// Rooms the connection currently belongs to.
    pub async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomName> {
        self.inner.state.lock().await.rooms_of(connection_id)
    }

    /// Whether the connection is in the registry.
    pub async fn is_tracked(&self, connection_id: &ConnectionId) -> bool {
        self.inner.state.lock().await.contains(connection_id)
    }

    async fn deliver(
        &self,
        connection: &Connection,
        message: &ServerMessage,
    ) -> Result<(), SendError> {
        let timeout = self.inner.config.send_timeout;
        match tokio::time::timeout(timeout, connection.send(message)).await {
            Ok(result) => result,
            Err(_) => Err(SendError::Timeout(timeout)),
        }
    }

    async fn fan_out(&self, targets: Vec<Connection>, message: &ServerMessage) {
        let results = join_all(targets.iter().map(|target| self.deliver(target, message))).await;

        // Targets are unique, so each failed connection is left at most once here.
        let failed: Vec<ConnectionId> = targets
            .iter()
            .zip(results)
            .filter_map(|(target, result)| match result {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!("Failed to deliver to connection '{}': {}", target.id(), e);
                    Some(target.id())
                }
            })
            .collect();

        for connection_id in failed {
            self.leave(&connection_id).await;
        }
    }
}

async fn notify_departures(
    hub: Weak<HubInner>,
    mut departures: mpsc::UnboundedReceiver<Departure>,
) {
    while let Some(Departure { room, remaining }) = departures.recv().await {
        let Some(inner) = hub.upgrade() else {
            break;
        };
        let hub = BroadcastHub { inner };
        tokio::spawn(async move {
            let left = ServerMessage::user_left(&room, remaining);
            hub.broadcast_to_room(&room, &left, None).await;
        });
    }
    tracing::debug!("Departure notifier stopped");
}
