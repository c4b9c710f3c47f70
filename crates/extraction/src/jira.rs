use std::time::Duration;

use async_trait::async_trait;
use meetsight_config::TrackerSettings;
use serde::Deserialize;

use crate::filer::{FilingError, TicketId, TrackerBackend};
use crate::TaskRecord;

/// Tracker backend for Jira Cloud (`POST /rest/api/3/issue`).
pub struct JiraBackend {
    settings: TrackerSettings,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CreateIssueResponse {
    key: String,
}

impl JiraBackend {
    pub fn new(settings: TrackerSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    fn issue_body(&self, task: &TaskRecord) -> serde_json::Value {
        let description = format!(
            "Assignee: {}\nTask: {}\nDue: {}\n\nFiled automatically from a live meeting transcript.",
            task.assignee, task.task, task.due
        );
        serde_json::json!({
            "fields": {
                "project": { "key": self.settings.project_key },
                "summary": issue_summary(task),
                "description": {
                    "type": "doc",
                    "version": 1,
                    "content": [
                        {
                            "type": "paragraph",
                            "content": [ { "type": "text", "text": description } ]
                        }
                    ]
                },
                "issuetype": { "name": self.settings.issue_type }
            }
        })
    }
}

/// Jira caps summaries at 255 characters.
fn issue_summary(task: &TaskRecord) -> String {
    let summary = format!("{}: {}", task.assignee, task.task);
    match summary.char_indices().nth(255) {
        Some((idx, _)) => summary[..idx].to_string(),
        None => summary,
    }
}

#[async_trait]
impl TrackerBackend for JiraBackend {
    async fn create_issue(&self, task: &TaskRecord) -> Result<TicketId, FilingError> {
        if !self.settings.enabled || self.settings.base_url.is_empty() {
            return Err(FilingError::Disabled);
        }

        let url = format!(
            "{}/rest/api/3/issue",
            self.settings.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(url)
            .basic_auth(&self.settings.email, Some(&self.settings.api_token))
            .timeout(Duration::from_secs(self.settings.timeout_secs))
            .json(&self.issue_body(task))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FilingError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CreateIssueResponse = response
            .json()
            .await
            .map_err(|e| FilingError::MalformedResponse(e.to_string()))?;

        Ok(TicketId(parsed.key))
    }

    fn name(&self) -> &str {
        "jira"
    }
}
