// Setup checklist
//
// Answers "will this process start and be able to answer?" without making
// any network call.

use std::fmt;
use std::net::ToSocketAddrs;

use crate::config::Settings;
use crate::providers::factory::ProviderKind;

/// Prefix of every Google API key.
const GOOGLE_KEY_PREFIX: &str = "AIza";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    /// Worth a look, but the service still runs
    Warn,
    Fail,
}

#[derive(Debug, Clone)]
pub struct CheckItem {
    pub status: CheckStatus,
    pub message: String,
}

impl CheckItem {
    fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn check(ok: bool, message: impl Into<String>) -> Self {
        Self::new(if ok { CheckStatus::Pass } else { CheckStatus::Fail }, message)
    }
}

impl fmt::Display for CheckItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.status {
            CheckStatus::Pass => "✓",
            CheckStatus::Warn => "!",
            CheckStatus::Fail => "✗",
        };
        write!(f, "{} {}", symbol, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Checklist {
    items: Vec<CheckItem>,
}

impl Checklist {
    pub fn from_settings(settings: &Settings) -> Self {
        let mut items = Vec::new();
        let selector = settings.provider_selector();
        let kind = ProviderKind::from_selector(&selector);

        match kind {
            ProviderKind::Mock if selector != "mock" => items.push(CheckItem::new(
                CheckStatus::Warn,
                format!(
                    "LLM_PROVIDER '{}' is not recognised; the mock provider will answer",
                    settings.llm_provider
                ),
            )),
            _ => items.push(CheckItem::new(
                CheckStatus::Pass,
                format!("LLM_PROVIDER selects the {:?} backend", kind),
            )),
        }

        match kind {
            ProviderKind::OpenAi => {
                items.push(CheckItem::check(
                    settings.openai_api_key.is_some(),
                    "OPENAI_API_KEY configured",
                ));
            }
            ProviderKind::Gemini => {
                let key = settings.gemini_api_key.as_deref();
                items.push(CheckItem::check(key.is_some(), "GEMINI_API_KEY configured"));
                if let Some(key) = key {
                    if !key.starts_with(GOOGLE_KEY_PREFIX) {
                        items.push(CheckItem::new(
                            CheckStatus::Warn,
                            format!("GEMINI_API_KEY does not start with '{}'", GOOGLE_KEY_PREFIX),
                        ));
                    }
                }
                items.push(CheckItem::check(
                    !settings.gemini_model.trim().is_empty(),
                    format!("Gemini model: {}", settings.gemini_model),
                ));
            }
            ProviderKind::Mock => {
                items.push(CheckItem::new(
                    CheckStatus::Pass,
                    "No API key required for the mock provider",
                ));
            }
        }

        let bind = settings.bind_address();
        let resolvable = bind
            .to_socket_addrs()
            .map(|mut addrs| addrs.next().is_some())
            .unwrap_or(false);
        items.push(CheckItem::check(resolvable, format!("Bind address {} is valid", bind)));

        items.push(CheckItem::check(
            settings.worker_threads > 0,
            format!("Worker pool size: {}", settings.worker_threads),
        ));

        Self { items }
    }

    pub fn items(&self) -> &[CheckItem] {
        &self.items
    }

    /// True when nothing failed. Warnings do not count.
    pub fn passed(&self) -> bool {
        self.items.iter().all(|i| i.status != CheckStatus::Fail)
    }

    pub fn failures(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.status == CheckStatus::Fail)
            .count()
    }
}

impl fmt::Display for Checklist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            writeln!(f, "{}", item)?;
        }
        Ok(())
    }
}
