//! Server state shared by all handlers.

use std::time::Duration;

use crate::{config::ServerConfig, infrastructure::BroadcastHub};

/// Shared application state
pub struct AppState {
    /// Room membership and fan-out
    pub hub: BroadcastHub,
    /// Key required by the `broadcast` client message
    pub admin_key: Option<String>,
    /// Period of the `/ws/notifications` stream
    pub notification_interval: Duration,
    /// Upper bound for one socket write
    pub send_timeout: Duration,
    /// Capacity of each connection's outbound queue
    pub outbound_buffer: usize,
}

impl AppState {
    /// Build the state from the CLI configuration.
    ///
    /// Must be called from within a Tokio runtime (see [`BroadcastHub::new`]).
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            hub: BroadcastHub::new(config.hub_config()),
            admin_key: config.admin_key.clone(),
            notification_interval: config.notification_interval(),
            send_timeout: config.send_timeout(),
            outbound_buffer: config.outbound_buffer,
        }
    }
}
