use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{info, warn};

use crate::events::TranscriptFragment;
use crate::state::AppState;

/// Webhook endpoint for the transcription provider.
///
/// The payload is taken as loosely as possible: `transcript` is preferred
/// over `text`, missing fields are defaulted, and even an unparseable body
/// is acknowledged (with an all-default fragment) rather than rejected —
/// the provider retries on error responses and there is nothing a retry
/// would fix.
pub async fn receive(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Json<serde_json::Value> {
    let fragment = match payload {
        Ok(Json(value)) => fragment_from_payload(&value),
        Err(rejection) => {
            warn!(%rejection, "Unparseable transcript payload; defaulting");
            TranscriptFragment::from_parts(None, None)
        }
    };

    info!(speaker = %fragment.speaker, viewers = state.ws_storage.connection_count(), "Transcript received");

    state.pipeline.handle_fragment(fragment).await;

    Json(serde_json::json!({ "status": "received" }))
}

/// Extracts a fragment from the webhook body, preferring `transcript` over
/// `text` when both are present.
pub fn fragment_from_payload(value: &serde_json::Value) -> TranscriptFragment {
    let speaker = value
        .get("speaker")
        .and_then(|s| s.as_str())
        .map(str::to_string);
    let text = value
        .get("transcript")
        .or_else(|| value.get("text"))
        .and_then(|t| t.as_str())
        .map(str::to_string);
    TranscriptFragment::from_parts(speaker, text)
}
