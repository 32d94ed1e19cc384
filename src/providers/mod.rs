// LLM provider abstraction
//
// A closed set of backends behind one capability: turn a prompt into text.
// Exactly one `Provider` is built at startup (see `factory`) and shared
// read-only by every request for the life of the process.

pub mod error;
pub mod factory;
pub mod gemini;
pub mod mock;
pub mod openai;

pub use error::ProviderError;
pub use factory::create_provider;
pub use gemini::{GeminiClient, GeminiProvider};
pub use mock::MockProvider;
pub use openai::OpenAIProvider;

/// The configured text-generation backend.
#[derive(Debug, Clone)]
pub enum Provider {
    Mock(MockProvider),
    OpenAi(OpenAIProvider),
    Gemini(GeminiProvider),
}

impl Provider {
    /// Generate text for `prompt`.
    ///
    /// Returns non-empty text or a descriptive error. Only the network-backed
    /// variants suspend; the mock answers immediately.
    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        match self {
            Provider::Mock(p) => Ok(p.generate(prompt)),
            Provider::OpenAi(p) => p.generate(prompt).await,
            Provider::Gemini(p) => p.generate(prompt).await,
        }
    }

    /// Type name of the backend, reported to callers as `model`.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Mock(_) => "MockProvider",
            Provider::OpenAi(_) => "OpenAIProvider",
            Provider::Gemini(_) => "GeminiProvider",
        }
    }

    /// Upstream model identifier, for logs and the setup checklist.
    pub fn model(&self) -> &str {
        match self {
            Provider::Mock(_) => "mock",
            Provider::OpenAi(p) => p.model(),
            Provider::Gemini(p) => p.model(),
        }
    }
}

impl From<MockProvider> for Provider {
    fn from(p: MockProvider) -> Self {
        Provider::Mock(p)
    }
}

impl From<OpenAIProvider> for Provider {
    fn from(p: OpenAIProvider) -> Self {
        Provider::OpenAi(p)
    }
}

impl From<GeminiProvider> for Provider {
    fn from(p: GeminiProvider) -> Self {
        Provider::Gemini(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_variant_generates() {
        let provider = Provider::from(MockProvider::new());
        let reply = provider.generate("hello").await.unwrap();
        assert!(reply.starts_with(mock::MOCK_MARKER));
        assert_eq!(provider.name(), "MockProvider");
        assert_eq!(provider.model(), "mock");
    }

    #[tokio::test]
    async fn test_openai_variant_identity() {
        let inner = OpenAIProvider::with_base_url(Some("sk-test".to_string()), "http://127.0.0.1:1")
            .unwrap();
        let provider = Provider::from(inner);
        assert_eq!(provider.name(), "OpenAIProvider");
        assert_eq!(provider.model(), "gpt-4o-mini");
    }
}
