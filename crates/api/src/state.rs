use std::sync::Arc;

use meetsight_config::Settings;
use meetsight_extraction::{Classifier, GeminiBackend, JiraBackend, TicketFiler};

use crate::pipeline::TranscriptPipeline;
use crate::ws::storage::WsStorage;

#[derive(Clone)]
pub struct AppState {
    pub ws_storage: Arc<WsStorage>,
    pub pipeline: Arc<TranscriptPipeline>,
}

impl AppState {
    /// Builds the production state: Gemini classification, Jira filing.
    pub fn new(settings: &Settings) -> Self {
        let classifier = Classifier::new(
            Arc::new(GeminiBackend::new(settings.classifier.clone())),
            settings.classifier.enabled,
        );
        let filer = TicketFiler::new(Arc::new(JiraBackend::new(settings.tracker.clone())));
        Self::with_components(Arc::new(WsStorage::new()), classifier, filer)
    }

    /// Assembles state from pre-built components; the integration tests use
    /// this to swap in scripted backends.
    pub fn with_components(
        ws_storage: Arc<WsStorage>,
        classifier: Classifier,
        filer: TicketFiler,
    ) -> Self {
        let pipeline = Arc::new(TranscriptPipeline::new(
            ws_storage.clone(),
            classifier,
            filer,
        ));
        Self {
            ws_storage,
            pipeline,
        }
    }
}
