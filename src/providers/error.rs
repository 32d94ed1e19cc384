// Provider error taxonomy
//
// Every backend failure is one of these. The request handler flattens them
// into a single outward-facing 500 carrying `to_string()` as the detail, so
// each message must stand on its own.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// A required credential or setting is missing
    #[error("{0}")]
    Configuration(String),

    /// The backend answered with a non-success status
    #[error("{backend} API request failed with status {status}: {body}")]
    Http {
        backend: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The request never produced a response (DNS, TLS, timeout, worker failure)
    #[error("{0}")]
    Transport(String),

    /// The backend answered but without the fields we need
    #[error("{0}")]
    ResponseShape(String),

    /// Any Gemini failure, re-wrapped so callers see one kind for that backend
    #[error("Gemini API error: {0}")]
    Gemini(#[source] Box<ProviderError>),
}

impl ProviderError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn response_shape(message: impl Into<String>) -> Self {
        Self::ResponseShape(message.into())
    }

    /// Build a transport error from a reqwest failure, keeping the backend name.
    pub fn transport(backend: &str, err: reqwest::Error) -> Self {
        Self::Transport(format!("Failed to reach {} API: {}", backend, err))
    }

    pub fn into_gemini(self) -> Self {
        match self {
            already @ Self::Gemini(_) => already,
            other => Self::Gemini(Box::new(other)),
        }
    }

    /// True for missing-credential failures, including wrapped ones.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Configuration(_) => true,
            Self::Gemini(inner) => inner.is_configuration(),
            _ => false,
        }
    }
}
