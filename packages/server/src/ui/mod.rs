//! WebSocket / HTTP server: the layer that accepts connections and hands
//! them to the hub.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{build_router, run};
