pub mod classifier;
pub mod filer;
pub mod gemini;
pub mod jira;
pub mod prompt;

pub use classifier::{Classifier, CompletionBackend};
pub use filer::{FilingError, TicketFiler, TicketId, TrackerBackend};
pub use gemini::GeminiBackend;
pub use jira::JiraBackend;

use serde::{Deserialize, Serialize};

/// A detected task assignment.
///
/// All three fields are always populated; a field the classifier could not
/// determine holds the literal string `"unspecified"`, never null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub assignee: String,
    pub task: String,
    pub due: String,
}

/// Value used for task fields the classifier left out.
pub const UNSPECIFIED: &str = "unspecified";

/// Result of classifying one transcript fragment.
///
/// `Malformed` is deliberately distinct from `NoTask`: a model reply that is
/// neither the literal `null` nor parseable JSON is a loggable condition,
/// not a silent negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationOutcome {
    /// The fragment contains no task assignment.
    NoTask,
    /// The fragment contains a task assignment.
    Task(TaskRecord),
    /// The classifier replied with something that could not be parsed.
    /// Carries the raw reply for diagnosis.
    Malformed(String),
}
