//! Router construction and the server entry point.

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    error::ServerError,
    ui::{
        handler::{
            echo_websocket_handler, get_room_info, get_stats, health_check,
            notifications_websocket_handler, room_websocket_handler,
        },
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Build the application router.
///
/// The static `/ws/echo` and `/ws/notifications` routes take precedence over
/// `/ws/{room}`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws/echo", get(echo_websocket_handler))
        .route("/ws/notifications", get(notifications_websocket_handler))
        .route("/ws/{room}", get(room_websocket_handler))
        .route("/stats", get(get_stats))
        .route("/rooms/{room}/info", get(get_room_info))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server until a shutdown signal arrives.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let state = Arc::new(AppState::from_config(&config));
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    tracing::info!("WebSocket endpoints: /ws/{{room}}, /ws/echo, /ws/notifications");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
