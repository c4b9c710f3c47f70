use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::TaskRecord;

#[derive(Debug, Error)]
pub enum FilingError {
    #[error("Ticket tracker is not configured")]
    Disabled,
    #[error("Tracker request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Tracker rejected the issue ({status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("Tracker returned an unexpected response: {0}")]
    MalformedResponse(String),
}

/// Opaque identifier of a filed ticket, e.g. a Jira issue key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketId(pub String);

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for pluggable issue-tracker backends.
#[async_trait]
pub trait TrackerBackend: Send + Sync + 'static {
    /// Creates one issue for a detected task.
    async fn create_issue(&self, task: &TaskRecord) -> Result<TicketId, FilingError>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}

/// The ticket filer.
///
/// Fire-and-forget from the pipeline's perspective: the error branch is
/// logged and dropped at the call site, never surfaced to the transcript
/// sender or to subscribers, and never retried.
pub struct TicketFiler {
    backend: Arc<dyn TrackerBackend>,
}

impl TicketFiler {
    pub fn new(backend: Arc<dyn TrackerBackend>) -> Self {
        Self { backend }
    }

    pub async fn file(&self, task: &TaskRecord) -> Result<TicketId, FilingError> {
        self.backend.create_issue(task).await
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}
