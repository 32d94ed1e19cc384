// Tutoring service
//
// Glue between the HTTP layer and the provider: normalise the request,
// build the teaching prompt, generate.

pub mod prompt;

pub use prompt::{build_teaching_prompt, DetailLevel, ExplanationLevel};

use std::sync::Arc;

use crate::providers::{Provider, ProviderError};

/// Reply text plus the backend that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub reply: String,
    pub model: String,
}

#[derive(Clone)]
pub struct TutorService {
    provider: Arc<Provider>,
}

impl TutorService {
    pub fn new(provider: Arc<Provider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<Provider> {
        &self.provider
    }

    /// Answer one teaching request. No retries: the first provider error is returned.
    pub async fn answer(
        &self,
        user_id: &str,
        topic: &str,
        explanation_level: &str,
        detail_level: Option<&str>,
    ) -> Result<Answer, ProviderError> {
        let level = ExplanationLevel::parse(explanation_level);
        let detail = DetailLevel::parse(detail_level);

        tracing::info!(
            user_id = %user_id,
            topic = %topic,
            level = %level,
            detail = %detail,
            provider = self.provider.name(),
            "Answering teaching request"
        );

        let prompt = build_teaching_prompt(topic, level, detail);
        tracing::debug!(prompt_chars = prompt.chars().count(), "Teaching prompt built");

        let reply = self.provider.generate(&prompt).await?;

        Ok(Answer {
            reply,
            model: self.provider.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MOCK_MARKER;
    use crate::providers::MockProvider;

    fn mock_service() -> TutorService {
        TutorService::new(Arc::new(Provider::from(MockProvider::new())))
    }

    #[tokio::test]
    async fn test_answer_with_mock() {
        let answer = mock_service()
            .answer("u1", "Cloud infrastructure", "beginner", Some("low"))
            .await
            .unwrap();
        assert!(answer.reply.starts_with(MOCK_MARKER));
        assert!(answer.reply.contains("Cloud infrastructure"));
        assert_eq!(answer.model, "MockProvider");
    }

    #[tokio::test]
    async fn test_invalid_level_is_normalised_in_prompt() {
        let answer = mock_service()
            .answer("u1", "X", "expert", None)
            .await
            .unwrap();
        // Mock echoes the first 200 chars of the prompt, which includes the level
        assert!(answer.reply.contains("beginner level student"));
        assert!(!answer.reply.contains("expert"));
    }
}
