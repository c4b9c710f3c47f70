use meetsight_extraction::TaskRecord;
use serde::{Deserialize, Serialize};

/// One inbound unit of transcribed speech.
///
/// Held only for the duration of a single pipeline pass; defaults for
/// missing webhook fields are applied at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptFragment {
    pub speaker: String,
    pub text: String,
}

pub const DEFAULT_SPEAKER: &str = "Unknown";
pub const DEFAULT_TEXT: &str = "No text";

impl TranscriptFragment {
    /// Builds a fragment from optional webhook fields, defaulting missing
    /// ones rather than rejecting the payload.
    pub fn from_parts(speaker: Option<String>, text: Option<String>) -> Self {
        Self {
            speaker: speaker.unwrap_or_else(|| DEFAULT_SPEAKER.to_string()),
            text: text.unwrap_or_else(|| DEFAULT_TEXT.to_string()),
        }
    }
}

/// A message broadcast to live viewers.
///
/// Wire form: `{"type": "transcript" | "task", "data": { ... }}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum LiveEvent {
    Transcript(TranscriptFragment),
    Task(TaskRecord),
}
