//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{get_room_info, get_stats, health_check};

// Re-export WebSocket handlers
pub use websocket::{
    echo_websocket_handler, notifications_websocket_handler, room_websocket_handler,
};
