//! Room-based WebSocket broadcast hub.
//!
//! Connections join named rooms; the [`BroadcastHub`](infrastructure::BroadcastHub)
//! fans room-scoped and global messages out to them, notifies rooms of
//! joins and leaves, and drops any connection whose delivery fails.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use ui::{build_router, run as run_server};
