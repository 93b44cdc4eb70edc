//! WebSocket connection handlers.

use std::{fmt::Display, sync::Arc, time::Duration};

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{
    sink::{Sink, SinkExt},
    stream::StreamExt,
};
use tokio::{sync::mpsc, time::Instant};

use crate::{
    domain::{Connection, ConnectionId, RoomName, SendError, ServerMessage},
    infrastructure::{ChannelSink, dto::websocket::ClientMessage},
    ui::state::AppState,
    usecase::HandleClientMessageUseCase,
};

/// `GET /ws/{room}`: join `room` and chat with its members.
pub async fn room_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let room = match RoomName::try_from(room) {
        Ok(room) => room,
        Err(e) => {
            tracing::warn!("Rejecting WebSocket with invalid room name: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_room_socket(socket, state, room)))
}

async fn handle_room_socket(socket: WebSocket, state: Arc<AppState>, room: RoomName) {
    let (sender, mut receiver) = socket.split();

    // The hub delivers into this channel; the writer task below drains it.
    let (tx, rx) = mpsc::channel::<ServerMessage>(state.outbound_buffer);
    let connection = Connection::new(Arc::new(ChannelSink::new(tx)));
    let connection_id = connection.id();

    state.hub.join(connection.clone(), room.clone()).await;

    // Spawn a task to forward hub messages to this client
    let mut send_task = tokio::spawn(forward_outbound(
        connection_id,
        rx,
        sender,
        state.send_timeout,
    ));

    // Spawn a task to receive messages from this client
    let usecase = HandleClientMessageUseCase::new(state.hub.clone(), state.admin_key.clone());
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection.id(), e);
                    break;
                }
            };

            let result = match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection.id(), text.as_str());
                    match ClientMessage::parse(text.as_str()) {
                        Ok(message) => usecase.execute(&connection, &room, message).await,
                        Err(e) => usecase.execute_invalid(&connection, e).await,
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection.id());
                    break;
                }
                // Ping/pong frames are answered by the WebSocket layer
                _ => Ok(()),
            };

            // The hub has already dropped us if a direct reply failed.
            if result.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.hub.leave(&connection_id).await;
    tracing::info!("Connection '{}' closed", connection_id);
}

/// `GET /ws/echo`: reply to every text frame with an `echo` message.
pub async fn echo_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let send_timeout = state.send_timeout;
    ws.on_upgrade(move |socket| handle_echo_socket(socket, send_timeout))
}

async fn handle_echo_socket(socket: WebSocket, send_timeout: Duration) {
    let (mut sender, mut receiver) = socket.split();

    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                let reply = ServerMessage::echo(text.to_string());
                if let Err(e) = write_message(&mut sender, &reply, send_timeout).await {
                    tracing::debug!("Echo socket write failed: {}", e);
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
    tracing::debug!("Echo socket closed");
}

/// `GET /ws/notifications`: a welcome message, then a numbered
/// notification every `notification_interval`.
pub async fn notifications_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let period = state.notification_interval;
    let send_timeout = state.send_timeout;
    ws.on_upgrade(move |socket| handle_notifications_socket(socket, period, send_timeout))
}

async fn handle_notifications_socket(socket: WebSocket, period: Duration, send_timeout: Duration) {
    let (mut sender, mut receiver) = socket.split();

    let welcome = ServerMessage::notification("Connected to notifications stream", None);
    if write_message(&mut sender, &welcome, send_timeout).await.is_err() {
        return;
    }

    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    let mut counter: u64 = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                counter += 1;
                let notification = ServerMessage::notification(
                    format!("Periodic notification #{counter}"),
                    Some(counter),
                );
                if let Err(e) = write_message(&mut sender, &notification, send_timeout).await {
                    tracing::debug!("Notification socket write failed: {}", e);
                    break;
                }
            }
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
    tracing::debug!("Notification socket closed after {} notification(s)", counter);
}

/// Drain the connection's outbound queue into its socket.
///
/// Returns when the queue is closed, or with the first failed write. A write
/// that does not finish within `send_timeout` counts as failed.
async fn forward_outbound<S>(
    connection_id: ConnectionId,
    mut rx: mpsc::Receiver<ServerMessage>,
    mut sender: S,
    send_timeout: Duration,
) -> Result<(), SendError>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    while let Some(message) = rx.recv().await {
        if let Err(e) = write_message(&mut sender, &message, send_timeout).await {
            tracing::warn!("Dropping connection '{}': {}", connection_id, e);
            return Err(e);
        }
    }
    Ok(())
}

/// Serialize `message` and write it as a text frame within `send_timeout`.
async fn write_message<S>(
    sender: &mut S,
    message: &ServerMessage,
    send_timeout: Duration,
) -> Result<(), SendError>
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    let json =
        serde_json::to_string(message).map_err(|e| SendError::Transport(e.to_string()))?;
    match tokio::time::timeout(send_timeout, sender.send(Message::Text(json.into()))).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(SendError::Transport(e.to_string())),
        Err(_) => Err(SendError::Timeout(send_timeout)),
    }
}
