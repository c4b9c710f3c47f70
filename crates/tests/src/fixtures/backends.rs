use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use meetsight_extraction::{
    CompletionBackend, FilingError, TaskRecord, TicketId, TrackerBackend,
};

/// Completion backend that replays scripted replies.
///
/// Each call pops the next scripted reply; when the script runs dry it
/// answers `null` so stray fragments never turn into surprise tasks.
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: AtomicUsize,
}

impl ScriptedCompletion {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn push_reply(&self, raw: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(raw.to_string()));
    }

    pub fn push_failure(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionBackend for ScriptedCompletion {
    async fn complete(&self, _prompt: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => anyhow::bail!("{message}"),
            None => Ok("null".to_string()),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Tracker backend that records every filed task.
pub struct RecordingTracker {
    filed: Mutex<Vec<TaskRecord>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl RecordingTracker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            filed: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
        })
    }

    /// Makes every subsequent `create_issue` call fail.
    pub fn fail_requests(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn filed(&self) -> Vec<TaskRecord> {
        self.filed.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackerBackend for RecordingTracker {
    async fn create_issue(&self, task: &TaskRecord) -> Result<TicketId, FilingError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(FilingError::Rejected {
                status: 500,
                body: "tracker exploded".to_string(),
            });
        }
        self.filed.lock().unwrap().push(task.clone());
        Ok(TicketId(format!("MEET-{}", call + 1)))
    }

    fn name(&self) -> &str {
        "recording"
    }
}
