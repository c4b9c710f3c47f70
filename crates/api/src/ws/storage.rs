use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::mpsc;

/// Queue handle for one viewer's outbound frames. The socket itself is
/// written only by that viewer's forwarding task, so a slow socket can
/// never park the fan-out.
pub type WsSender = mpsc::Sender<Message>;

/// Tracks all connected live viewers by connection ID.
///
/// The registry is the sole owner of subscriber channels: fan-out takes a
/// snapshot, nothing retains a sender past one broadcast call.
pub struct WsStorage {
    connections: DashMap<String, WsSender>,
}

impl WsStorage {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    pub fn add(&self, connection_id: String, sender: WsSender) {
        self.connections.insert(connection_id, sender);
    }

    pub fn remove(&self, connection_id: &str) {
        self.connections.remove(connection_id);
    }

    /// Snapshot of all current senders, taken before iteration so that a
    /// viewer disconnecting mid-broadcast cannot invalidate the walk.
    pub fn senders(&self) -> Vec<(String, WsSender)> {
        self.connections
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for WsStorage {
    fn default() -> Self {
        Self::new()
    }
}
