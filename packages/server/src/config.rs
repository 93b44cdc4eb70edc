//! Command line configuration.

use std::time::Duration;

use clap::{Parser, builder::RangedU64ValueParser};

use crate::infrastructure::{DEFAULT_OUTBOUND_BUFFER, HubConfig};

/// Room-based WebSocket broadcast hub
#[derive(Debug, Clone, Parser)]
#[command(name = "roomcast-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Upper bound for a single delivery to one connection, in milliseconds
    #[arg(long, default_value_t = 5000, value_parser = clap::value_parser!(u64).range(1..))]
    pub send_timeout_ms: u64,

    /// Messages queued for one connection before deliveries to it wait
    #[arg(
        long,
        default_value_t = DEFAULT_OUTBOUND_BUFFER,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub outbound_buffer: usize,

    /// Key required by the `broadcast` client message. Without it every
    /// broadcast attempt is rejected.
    #[arg(long)]
    pub admin_key: Option<String>,

    /// Period of the `/ws/notifications` stream, in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub notification_interval_secs: u64,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }

    pub fn hub_config(&self) -> HubConfig {
        HubConfig {
            send_timeout: self.send_timeout(),
        }
    }

    pub fn notification_interval(&self) -> Duration {
        Duration::from_secs(self.notification_interval_secs)
    }
}
