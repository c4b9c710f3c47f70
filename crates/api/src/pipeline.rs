use std::sync::Arc;

use meetsight_extraction::{Classifier, ClassificationOutcome, FilingError, TicketFiler};
use tracing::{debug, info, warn};

use crate::events::{LiveEvent, TranscriptFragment};
use crate::ws::dispatcher;
use crate::ws::storage::WsStorage;

/// The transcript pipeline.
///
/// One fragment flows through two stages: an immediate live broadcast, and
/// a detached task-extraction continuation (classify → broadcast task →
/// file ticket). The continuation never blocks the webhook acknowledgement
/// and none of its failures propagate; per-subscriber ordering holds
/// because the transcript event is queued on every viewer's channel before
/// the continuation is spawned.
pub struct TranscriptPipeline {
    ws_storage: Arc<WsStorage>,
    classifier: Arc<Classifier>,
    filer: Arc<TicketFiler>,
}

impl TranscriptPipeline {
    pub fn new(ws_storage: Arc<WsStorage>, classifier: Classifier, filer: TicketFiler) -> Self {
        Self {
            ws_storage,
            classifier: Arc::new(classifier),
            filer: Arc::new(filer),
        }
    }

    /// Broadcasts the fragment live, then detaches task extraction.
    pub async fn handle_fragment(&self, fragment: TranscriptFragment) {
        dispatcher::broadcast(
            &self.ws_storage,
            &LiveEvent::Transcript(fragment.clone()),
        );

        let ws_storage = self.ws_storage.clone();
        let classifier = self.classifier.clone();
        let filer = self.filer.clone();
        tokio::spawn(async move {
            extract_task(ws_storage, classifier, filer, fragment).await;
        });
    }
}

async fn extract_task(
    ws_storage: Arc<WsStorage>,
    classifier: Arc<Classifier>,
    filer: Arc<TicketFiler>,
    fragment: TranscriptFragment,
) {
    match classifier.classify(&fragment.text).await {
        ClassificationOutcome::NoTask => {
            debug!(speaker = %fragment.speaker, "No task detected");
        }
        ClassificationOutcome::Malformed(raw) => {
            warn!(speaker = %fragment.speaker, raw, "Classifier reply was malformed; dropping");
        }
        ClassificationOutcome::Task(record) => {
            info!(
                assignee = %record.assignee,
                task = %record.task,
                due = %record.due,
                "Task detected"
            );
            dispatcher::broadcast(&ws_storage, &LiveEvent::Task(record.clone()));

            match filer.file(&record).await {
                Ok(ticket) => {
                    info!(%ticket, tracker = filer.backend_name(), "Task filed");
                }
                Err(FilingError::Disabled) => {
                    debug!("Ticket tracker disabled; task not filed");
                }
                Err(e) => {
                    warn!(%e, tracker = filer.backend_name(), "Failed to file task");
                }
            }
        }
    }
}
