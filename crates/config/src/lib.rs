use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Top-level settings, loaded from `config/default.toml`, an optional
/// `config/local.toml` override, and `MEETSIGHT__`-prefixed environment
/// variables (e.g. `MEETSIGHT__CLASSIFIER__API_KEY`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub classifier: ClassifierSettings,
    pub tracker: TrackerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Settings for the external LLM classification backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Enable task classification. When disabled, fragments are still
    /// broadcast live but no classification call is made.
    pub enabled: bool,
    pub api_key: String,
    /// Base URL of the Generative Language API.
    pub endpoint: String,
    /// Model name, e.g. "gemini-1.5-flash".
    pub model: String,
    /// Upper bound on generated tokens per classification.
    pub max_output_tokens: u32,
    /// Low temperature keeps the output close to the strict-JSON contract.
    pub temperature: f32,
    /// Per-request timeout for the classification call.
    pub timeout_secs: u64,
}

/// Settings for the external issue tracker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Enable ticket filing. When disabled, detected tasks are still
    /// broadcast but never filed.
    pub enabled: bool,
    /// Jira site base URL, e.g. "https://acme.atlassian.net".
    pub base_url: String,
    pub email: String,
    pub api_token: String,
    pub project_key: String,
    pub issue_type: String,
    /// Per-request timeout for the filing call.
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: String::new(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            max_output_tokens: 256,
            temperature: 0.1,
            timeout_secs: 30,
        }
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: String::new(),
            email: String::new(),
            api_token: String::new(),
            project_key: String::new(),
            issue_type: "Task".to_string(),
            timeout_secs: 15,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("MEETSIGHT").separator("__"))
            .build()?
            .try_deserialize()
    }
}
