use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use meetsight_api::{build_router, state::AppState, ws::storage::WsStorage};
use meetsight_extraction::{Classifier, TicketFiler};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

use super::backends::{RecordingTracker, ScriptedCompletion};

/// Spawns the real router on an ephemeral port with scripted backends.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    pub completion: Arc<ScriptedCompletion>,
    pub tracker: Arc<RecordingTracker>,
    pub ws_storage: Arc<WsStorage>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(ScriptedCompletion::new(), RecordingTracker::new()).await
    }

    pub async fn spawn_with(
        completion: Arc<ScriptedCompletion>,
        tracker: Arc<RecordingTracker>,
    ) -> Self {
        let ws_storage = Arc::new(WsStorage::new());
        let classifier = Classifier::new(completion.clone(), true);
        let filer = TicketFiler::new(tracker.clone());
        let state = AppState::with_components(ws_storage.clone(), classifier, filer);
        let router = build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            addr,
            client: reqwest::Client::new(),
            completion,
            tracker,
            ws_storage,
        }
    }

    pub async fn post_transcript(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("http://{}/webhook/transcript", self.addr))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("http://{}{}", self.addr, path))
            .send()
            .await
            .unwrap()
    }

    /// Connects a viewer and waits for the greeting frame, so the
    /// subscription is registered before the caller proceeds.
    pub async fn subscribe(&self) -> Viewer {
        let (stream, _) = tokio_tungstenite::connect_async(format!("ws://{}/ws", self.addr))
            .await
            .unwrap();
        let mut viewer = Viewer { stream };
        let greeting = viewer
            .next_json(Duration::from_secs(5))
            .await
            .expect("no greeting frame");
        assert_eq!(greeting["type"], "connected");
        viewer
    }
}

/// One connected live viewer.
pub struct Viewer {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl Viewer {
    /// Next JSON text frame, or `None` if the window elapses or the
    /// connection ends.
    pub async fn next_json(&mut self, window: Duration) -> Option<serde_json::Value> {
        let deadline = tokio::time::Instant::now() + window;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            match tokio::time::timeout(remaining, self.stream.next()).await {
                Err(_) | Ok(None) | Ok(Some(Err(_))) => return None,
                Ok(Some(Ok(Message::Text(text)))) => {
                    return Some(serde_json::from_str(text.as_str()).expect("frame was not JSON"));
                }
                Ok(Some(Ok(_))) => continue,
            }
        }
    }

    pub async fn expect_event(&mut self) -> serde_json::Value {
        self.next_json(Duration::from_secs(5))
            .await
            .expect("timed out waiting for a live event")
    }

    pub async fn expect_silence(&mut self, window: Duration) {
        if let Some(event) = self.next_json(window).await {
            panic!("expected no live event, got {event}");
        }
    }

    pub async fn send_text(&mut self, text: &str) {
        self.stream.send(Message::text(text)).await.unwrap();
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }

    /// Drops the TCP connection without a WebSocket close handshake, the
    /// way a crashed or unplugged viewer disappears.
    pub fn abandon(self) {
        drop(self.stream);
    }
}
