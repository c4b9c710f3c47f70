use axum::extract::ws::Message;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use super::storage::WsStorage;
use crate::events::LiveEvent;

/// Broadcasts one live event to every connected viewer.
///
/// The event is serialized once and queued on each viewer's outbound
/// channel without awaiting: a viewer whose queue is full (it stopped
/// reading and its forwarding task is parked on the socket) drops this
/// event with a warning, and a viewer whose channel is closed is evicted.
/// Neither case affects delivery to the others or the caller.
pub fn broadcast(ws_storage: &WsStorage, event: &LiveEvent) {
    let text = match serde_json::to_string(event) {
        Ok(text) => text,
        Err(e) => {
            warn!(%e, "Failed to serialize live event");
            return;
        }
    };

    for (connection_id, sender) in ws_storage.senders() {
        match sender.try_send(Message::text(text.clone())) {
            Ok(()) => {
                debug!(%connection_id, "Live event queued");
            }
            Err(TrySendError::Full(_)) => {
                warn!(%connection_id, "Viewer outbound queue full; dropping event");
            }
            Err(TrySendError::Closed(_)) => {
                ws_storage.remove(&connection_id);
                debug!(%connection_id, "Viewer channel closed; removed from registry");
            }
        }
    }
}
