//! Test server fixture.
//!
//! Serves the real router on an ephemeral port for the lifetime of the
//! fixture.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use roomcast_server::{ServerConfig, build_router, ui::state::AppState};
use serde_json::Value;
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub const ADMIN_KEY: &str = "test-admin-key";

const RECV_TIMEOUT: Duration = Duration::from_secs(3);

pub type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with an admin key and a 1 second notification period.
    pub async fn start() -> Self {
        let config = ServerConfig::parse_from([
            "roomcast-server",
            "--admin-key",
            ADMIN_KEY,
            "--notification-interval-secs",
            "1",
        ]);
        Self::start_with(config).await
    }

    pub async fn start_with(config: ServerConfig) -> Self {
        let state = Arc::new(AppState::from_config(&config));
        let app = build_router(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server failed");
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }

    /// Open a WebSocket to `path`.
    pub async fn connect(&self, path: &str) -> WsClient {
        let (ws, _response) = connect_async(self.ws_url(path))
            .await
            .expect("Failed to connect WebSocket");
        ws
    }

    /// Open a WebSocket to `/ws/{room}` and wait until the hub tracks it.
    pub async fn join(&self, room: &str) -> WsClient {
        let mut ws = self.connect(&format!("/ws/{room}")).await;
        send_json(&mut ws, serde_json::json!({"type": "ping", "timestamp": "ready"})).await;
        let pong = recv_json(&mut ws).await;
        assert_eq!(pong["type"], "pong");
        assert_eq!(pong["original_timestamp"], "ready");
        ws
    }

    pub async fn get_json(&self, path: &str) -> (u16, Value) {
        let response = reqwest::Client::new()
            .get(format!("{}{}", self.base_url(), path))
            .send()
            .await
            .expect("Failed to send request");
        let status = response.status().as_u16();
        let body = response.json().await.unwrap_or(Value::Null);
        (status, body)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn send_json(ws: &mut WsClient, value: Value) {
    ws.send(Message::Text(value.to_string().into()))
        .await
        .expect("Failed to send WebSocket message");
}

pub async fn send_text(ws: &mut WsClient, text: &str) {
    ws.send(Message::Text(text.to_string().into()))
        .await
        .expect("Failed to send WebSocket message");
}

/// Next JSON text frame, skipping control frames.
pub async fn recv_json(ws: &mut WsClient) -> Value {
    loop {
        let message = tokio::time::timeout(RECV_TIMEOUT, ws.next())
            .await
            .expect("Timed out waiting for WebSocket message")
            .expect("WebSocket stream ended")
            .expect("WebSocket error");
        if let Message::Text(text) = message {
            return serde_json::from_str(text.as_str()).expect("Failed to parse JSON");
        }
    }
}
