//! WebSocket handler
//!
//! Accepts the upgrade, registers the connection, and runs a receive task
//! plus an mpsc-drained send task until either side ends. An identify
//! broadcasts the online-users snapshot to every connection; so does the
//! disconnect of an identified connection. Anonymous disconnects are silent.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::connection::{Connection, ConnectionManager, ConnectionState};
use crate::notify::RealtimeGateway;
use crate::protocol::WireEvent;

use super::GatewayState;

/// Outgoing frame buffer per connection
const FRAME_BUFFER_SIZE: usize = 100;

/// WebSocket upgrade endpoint
pub async fn ws_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Drive an upgraded socket until it closes
async fn handle_socket(state: GatewayState, socket: WebSocket) {
    let manager = state.connection_manager().clone();
    let notifier = state.notifier().clone();

    let (tx, mut rx) = mpsc::channel::<WireEvent>(FRAME_BUFFER_SIZE);
    let connection = manager.add_connection(tx);
    let connection_id = connection.id();
    connection.set_state(ConnectionState::Anonymous).await;

    tracing::info!(connection_id = %connection_id, "WebSocket connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    let manager_recv = manager.clone();
    let notifier_recv = notifier.clone();
    let connection_recv = connection.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(frame) = ws_stream.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    if handle_text_frame(&manager_recv, &notifier_recv, &connection_recv, &text)
                        .await
                        .is_err()
                    {
                        return;
                    }
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        connection_id = %connection_recv.id(),
                        "Binary frames not supported, closing"
                    );
                    return;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Ok(Message::Close(_)) => {
                    tracing::info!(
                        connection_id = %connection_recv.id(),
                        "Client closed connection"
                    );
                    return;
                }
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_recv.id(),
                        error = %e,
                        "WebSocket error"
                    );
                    return;
                }
            }
        }
    });

    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event.to_json() {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(connection_id = %connection_id, error = %e, "Frame encode failed");
                }
            }
        }

        let _ = ws_sink.close().await;
    });

    tokio::select! {
        _ = recv_task => {
            tracing::debug!(connection_id = %connection_id, "Receive task ended");
        }
        _ = send_task => {
            tracing::debug!(connection_id = %connection_id, "Send task ended");
        }
    }

    cleanup_connection(&manager, connection_id).await;
}

/// Protocol violation: the connection must be closed
struct ProtocolViolation;

/// Handle one text frame from the client
async fn handle_text_frame(
    manager: &Arc<ConnectionManager>,
    notifier: &RealtimeGateway,
    connection: &Arc<Connection>,
    text: &str,
) -> Result<(), ProtocolViolation> {
    let event = match WireEvent::from_json(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(
                connection_id = %connection.id(),
                error = %e,
                "Malformed frame, closing"
            );
            return Err(ProtocolViolation);
        }
    };

    if !event.is_client_event() {
        tracing::debug!(
            connection_id = %connection.id(),
            event = event.name(),
            "Server-only event from client, closing"
        );
        return Err(ProtocolViolation);
    }

    match event {
        WireEvent::Identify { user_id } => {
            manager.identify(connection.id(), user_id).await;
            // Everyone, identified or not, gets the fresh snapshot
            manager.broadcast_presence().await;
        }
        WireEvent::Typing {
            sender_id,
            receiver_id,
        }
        | WireEvent::StopTyping {
            sender_id,
            receiver_id,
        } => {
            // Relay only under the identity this connection proved
            if connection.user_id().await == Some(sender_id) {
                notifier.relay_ephemeral(receiver_id, &event).await;
            } else {
                tracing::debug!(
                    connection_id = %connection.id(),
                    claimed_sender = %sender_id,
                    "Typing signal with unproven sender id, dropped"
                );
            }
        }
        _ => unreachable!("is_client_event covers the remaining variants"),
    }

    Ok(())
}

/// Tear down a connection and re-broadcast presence if it was identified
async fn cleanup_connection(manager: &Arc<ConnectionManager>, connection_id: uuid::Uuid) {
    let was_identified = manager.remove_connection(connection_id).await;

    if was_identified {
        manager.broadcast_presence().await;
    }

    tracing::info!(connection_id = %connection_id, was_identified, "Connection cleaned up");
}
