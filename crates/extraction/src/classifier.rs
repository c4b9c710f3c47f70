use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::prompt::task_extraction_prompt;
use crate::{ClassificationOutcome, TaskRecord, UNSPECIFIED};

/// Trait for pluggable text-completion backends.
#[async_trait]
pub trait CompletionBackend: Send + Sync + 'static {
    /// Sends one prompt and returns the raw model reply.
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}

/// The classifier adapter.
///
/// This is the sole boundary between the pipeline and the unreliable
/// free-form-text backend: call failures are absorbed as `NoTask`, and
/// non-conforming replies surface as `Malformed` instead of crashing or
/// being coerced to a negative.
pub struct Classifier {
    backend: Arc<dyn CompletionBackend>,
    enabled: bool,
}

impl Classifier {
    pub fn new(backend: Arc<dyn CompletionBackend>, enabled: bool) -> Self {
        Self { backend, enabled }
    }

    /// Classifies one fragment of transcript text.
    ///
    /// Never returns an error: one failed classification must not interrupt
    /// the live-broadcast path.
    pub async fn classify(&self, text: &str) -> ClassificationOutcome {
        if !self.enabled {
            debug!("Classifier disabled; skipping");
            return ClassificationOutcome::NoTask;
        }

        let prompt = task_extraction_prompt(text);
        let raw = match self.backend.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(backend = self.backend.name(), %e, "Classification call failed");
                return ClassificationOutcome::NoTask;
            }
        };

        parse_outcome(&raw)
    }
}

/// Model reply before missing-field normalization.
#[derive(Debug, Deserialize)]
struct RawTask {
    assignee: Option<String>,
    task: Option<String>,
    due: Option<String>,
}

impl RawTask {
    fn normalize(self) -> TaskRecord {
        TaskRecord {
            assignee: self.assignee.unwrap_or_else(|| UNSPECIFIED.to_string()),
            task: self.task.unwrap_or_else(|| UNSPECIFIED.to_string()),
            due: self.due.unwrap_or_else(|| UNSPECIFIED.to_string()),
        }
    }
}

/// Parses a raw model reply into a [`ClassificationOutcome`].
pub fn parse_outcome(raw: &str) -> ClassificationOutcome {
    let body = strip_code_fence(raw.trim());

    if body == "null" {
        return ClassificationOutcome::NoTask;
    }

    match serde_json::from_str::<RawTask>(body) {
        Ok(task) => ClassificationOutcome::Task(task.normalize()),
        Err(_) => ClassificationOutcome::Malformed(raw.to_string()),
    }
}

/// Strips one markdown code fence, if present.
///
/// Gemini wraps replies in ```json fences often enough that treating them
/// as malformed would drop genuine tasks.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop a language tag like "json" on the opening fence line.
    inner
        .strip_prefix("json")
        .unwrap_or(inner)
        .trim()
}
