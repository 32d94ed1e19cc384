// Project-wide constants
//
// Centralised here so ports, model names and endpoints have one source of
// truth. Import via `use crate::config::constants::*;`.

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "IsCoolGPT";

/// Default deployment environment name.
pub const DEFAULT_ENV: &str = "development";

/// Default bind host (all interfaces, matches container deployments).
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8000;

/// Provider selector used when nothing is configured.
pub const DEFAULT_PROVIDER: &str = "mock";

/// OpenAI API root (the provider appends `/v1/chat/completions`).
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Chat model used for every OpenAI request.
pub const OPENAI_MODEL: &str = "gpt-4o-mini";

/// Output cap for OpenAI completions.
pub const OPENAI_MAX_TOKENS: u32 = 300;

/// OpenAI request timeout. Gemini calls deliberately have none.
pub const OPENAI_TIMEOUT_SECS: u64 = 30;

/// Gemini REST root.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini model used when `GEMINI_MODEL` is unset or blank.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Upper bound on tokio's blocking pool (where Gemini calls run).
pub const DEFAULT_WORKER_THREADS: usize = 32;

/// Request body cap for the HTTP server. Ask payloads are a few short strings.
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;
