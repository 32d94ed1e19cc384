// Provider factory
//
// Maps the configured selector onto exactly one backend.

use super::{GeminiProvider, MockProvider, OpenAIProvider, Provider, ProviderError};
use crate::config::Settings;

/// Which backend a selector string picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Mock,
    OpenAi,
    Gemini,
}

impl ProviderKind {
    /// Case-insensitive; anything unrecognised (including empty) is the mock.
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim().to_lowercase().as_str() {
            "openai" => ProviderKind::OpenAi,
            "gemini" => ProviderKind::Gemini,
            _ => ProviderKind::Mock,
        }
    }
}

/// Build the process-wide provider from settings.
///
/// Gemini without a key fails here so startup aborts. OpenAI without a key
/// is built anyway and fails on each call.
pub fn create_provider(settings: &Settings) -> Result<Provider, ProviderError> {
    let provider = match ProviderKind::from_selector(&settings.llm_provider) {
        ProviderKind::OpenAi => Provider::from(OpenAIProvider::from_config(
            settings.openai_api_key.clone(),
            settings.openai_base_url.clone(),
        )?),
        ProviderKind::Gemini => Provider::from(GeminiProvider::from_config(
            settings.gemini_api_key.clone(),
            Some(settings.gemini_model.clone()),
            settings.gemini_base_url.clone(),
        )?),
        ProviderKind::Mock => Provider::from(MockProvider::new()),
    };

    tracing::info!(
        selector = %settings.llm_provider,
        provider = provider.name(),
        model = provider.model(),
        "LLM provider selected"
    );

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(selector: &str) -> Settings {
        Settings {
            llm_provider: selector.to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_selector_mapping() {
        assert_eq!(ProviderKind::from_selector("openai"), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::from_selector("OpenAI"), ProviderKind::OpenAi);
        assert_eq!(ProviderKind::from_selector("GEMINI"), ProviderKind::Gemini);
        assert_eq!(ProviderKind::from_selector(" gemini "), ProviderKind::Gemini);
        assert_eq!(ProviderKind::from_selector("mock"), ProviderKind::Mock);
        assert_eq!(ProviderKind::from_selector(""), ProviderKind::Mock);
        assert_eq!(ProviderKind::from_selector("claude"), ProviderKind::Mock);
    }

    #[test]
    fn test_default_settings_build_mock() {
        let provider = create_provider(&Settings::default()).unwrap();
        assert_eq!(provider.name(), "MockProvider");
    }

    #[test]
    fn test_unknown_selector_builds_mock() {
        let provider = create_provider(&settings("unknown_provider_xyz")).unwrap();
        assert_eq!(provider.name(), "MockProvider");
    }

    #[test]
    fn test_openai_any_case() {
        let mut s = settings("OpenAI");
        s.openai_api_key = Some("sk-test".to_string());
        let provider = create_provider(&s).unwrap();
        assert_eq!(provider.name(), "OpenAIProvider");
    }

    #[tokio::test]
    async fn test_openai_without_key_builds_but_fails_on_call() {
        let provider = create_provider(&settings("openai")).unwrap();
        assert_eq!(provider.name(), "OpenAIProvider");
        let err = provider.generate("hello").await.unwrap_err();
        assert_eq!(err.to_string(), "OpenAI API key not configured");
    }

    #[test]
    fn test_gemini_with_key() {
        let mut s = settings("Gemini");
        s.gemini_api_key = Some("AIza-test".to_string());
        s.gemini_model = "gemini-1.5-pro".to_string();
        let provider = create_provider(&s).unwrap();
        assert_eq!(provider.name(), "GeminiProvider");
        assert_eq!(provider.model(), "gemini-1.5-pro");
    }

    #[test]
    fn test_gemini_without_key_is_a_configuration_error() {
        let err = match create_provider(&settings("gemini")) {
            Ok(p) => panic!("expected an error, built {}", p.name()),
            Err(e) => e,
        };
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Gemini API key not configured"));
    }
}
