// Runtime settings
//
// Sourced from process environment variables (case-insensitive names such as
// `LLM_PROVIDER` or `gemini_model`) layered over compiled-in defaults.

use anyhow::{Context, Result};
use config::{Environment, Map};
use serde::Deserialize;

use super::constants::*;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Deployment environment name, echoed by the health endpoint
    pub env: String,
    pub host: String,
    pub port: u16,
    /// Backend selector: "openai", "gemini", anything else means mock
    pub llm_provider: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Maximum threads in the blocking pool used for Gemini calls
    pub worker_threads: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: DEFAULT_ENV.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            llm_provider: DEFAULT_PROVIDER.to_string(),
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            worker_threads: DEFAULT_WORKER_THREADS,
        }
    }
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(Environment::default())
    }

    /// Load settings from an explicit variable map instead of the process
    /// environment. Used by tests and the setup checklist.
    pub fn from_vars(vars: Map<String, String>) -> Result<Self> {
        Self::from_environment(Environment::default().source(Some(vars)))
    }

    fn from_environment(source: Environment) -> Result<Self> {
        let settings: Settings = config::Config::builder()
            .add_source(source)
            .build()
            .context("Failed to read settings from environment")?
            .try_deserialize()
            .context("Invalid settings value in environment")?;

        Ok(settings.normalized())
    }

    /// Blank credentials count as unset; blank model falls back to the default.
    fn normalized(mut self) -> Self {
        self.openai_api_key = non_blank(self.openai_api_key);
        self.gemini_api_key = non_blank(self.gemini_api_key);
        if self.gemini_model.trim().is_empty() {
            self.gemini_model = DEFAULT_GEMINI_MODEL.to_string();
        }
        self
    }

    /// `host:port` for the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Provider selector, trimmed and lowercased.
    pub fn provider_selector(&self) -> String {
        self.llm_provider.trim().to_lowercase()
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
