use axum::{
    extract::{State, WebSocketUpgrade, ws::{Message, WebSocket}},
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::state::AppState;
use crate::ws::storage::WsSender;

/// Outbound frames buffered per viewer before the fan-out starts dropping.
const OUTBOUND_BUFFER: usize = 64;

pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4().to_string();
    info!(%connection_id, "Viewer connected");

    let (mut sink, mut receiver) = socket.split();
    let (sender, mut outbound) = mpsc::channel::<Message>(OUTBOUND_BUFFER);

    // Forwarding task: the only writer to the socket. The fan-out queues
    // frames on `sender` and never touches the socket itself.
    let forward = tokio::spawn(async move {
        while let Some(msg) = outbound.recv().await {
            if sink.send(msg).await.is_err() {
                break;
            }
        }
        let _ = sink.close().await;
    });

    state.ws_storage.add(connection_id.clone(), sender.clone());

    let greeting = serde_json::json!({
        "type": "connected",
        "connection_id": connection_id,
    });
    let _ = sender
        .send(Message::text(serde_json::to_string(&greeting).unwrap_or_default()))
        .await;

    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                handle_client_message(&sender, &connection_id, &text);
            }
            Ok(Message::Ping(data)) => {
                let _ = sender.try_send(Message::Pong(data));
            }
            Ok(Message::Close(_)) => {
                break;
            }
            Err(e) => {
                warn!(%connection_id, %e, "WebSocket error");
                break;
            }
            _ => {}
        }
    }

    state.ws_storage.remove(&connection_id);
    drop(sender);
    // The socket may be wedged mid-write to a peer that stopped reading;
    // don't wait for the pending queue to drain.
    forward.abort();
    info!(%connection_id, viewers = state.ws_storage.connection_count(), "Viewer disconnected");
}

/// Viewers are receive-only apart from keepalive pings; anything else is
/// ignored.
fn handle_client_message(sender: &WsSender, connection_id: &str, text: &str) {
    let parsed: serde_json::Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(_) => return,
    };

    let msg_type = parsed.get("type").and_then(|t| t.as_str()).unwrap_or("");
    debug!(%connection_id, msg_type, "WS message received");

    if msg_type == "ping" {
        let pong = serde_json::json!({ "type": "pong" });
        let _ = sender.try_send(Message::text(
            serde_json::to_string(&pong).unwrap_or_default(),
        ));
    }
}
