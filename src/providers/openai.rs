// OpenAI chat-completion provider
//
// One user message in, the first choice's text out. No retries and no
// streaming; a fixed 30 second timeout bounds every call.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::error::ProviderError;
use crate::config::constants::{
    DEFAULT_OPENAI_BASE_URL, OPENAI_MAX_TOKENS, OPENAI_MODEL, OPENAI_TIMEOUT_SECS,
};
use crate::config::non_blank;

const BACKEND: &str = "OpenAI";

/// Environment variable consulted when no key is passed in.
pub const OPENAI_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI API provider
///
/// A missing key is not a construction error: the provider is still built and
/// every `generate` call reports the missing key instead.
#[derive(Clone)]
pub struct OpenAIProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenAIProvider {
    /// Create a provider against the public OpenAI endpoint.
    pub fn new(api_key: Option<String>) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, DEFAULT_OPENAI_BASE_URL)
    }

    /// Create a provider against a custom API root (proxies, test servers).
    pub fn with_base_url(
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        Self::from_config(resolve_api_key(api_key), base_url)
    }

    /// Build from already-resolved settings. The environment is not consulted.
    pub fn from_config(
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(OPENAI_TIMEOUT_SECS))
            .build()
            .map_err(|e| ProviderError::transport(BACKEND, e))?;

        Ok(Self {
            client,
            api_key: non_blank(api_key),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        OPENAI_MODEL
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::configuration("OpenAI API key not configured"))?;

        let request = ChatRequest {
            model: OPENAI_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: OPENAI_MAX_TOKENS,
        };
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!(model = OPENAI_MODEL, prompt_chars = prompt.len(), "Sending request to OpenAI API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::transport(BACKEND, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http {
                backend: BACKEND,
                status,
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::transport(BACKEND, e))?;

        extract_reply(&body)
    }
}

impl fmt::Debug for OpenAIProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAIProvider")
            .field("base_url", &self.base_url)
            .field("api_key_set", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

/// Explicit key first, then `OPENAI_API_KEY`.
pub fn resolve_api_key(api_key: Option<String>) -> Option<String> {
    non_blank(api_key).or_else(|| non_blank(std::env::var(OPENAI_KEY_ENV).ok()))
}

/// Pull `choices[0].message.content` out of a chat-completion body.
fn extract_reply(body: &str) -> Result<String, ProviderError> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::response_shape(format!("Failed to parse OpenAI API response: {}", e))
    })?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::response_shape("OpenAI returned no choices in response"))?;

    match choice.message.content {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ProviderError::response_shape(format!(
            "OpenAI returned an empty message. finish_reason={}",
            choice.finish_reason.as_deref().unwrap_or("none")
        ))),
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = ChatRequest {
            model: OPENAI_MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            max_tokens: OPENAI_MAX_TOKENS,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["max_tokens"], 300);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_extract_reply_first_choice() {
        let body = r#"{"id":"chatcmpl-1","choices":[
            {"index":0,"message":{"role":"assistant","content":"first"},"finish_reason":"stop"},
            {"index":1,"message":{"role":"assistant","content":"second"},"finish_reason":"stop"}
        ]}"#;
        assert_eq!(extract_reply(body).unwrap(), "first");
    }

    #[test]
    fn test_extract_reply_no_choices() {
        let err = extract_reply(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, ProviderError::ResponseShape(_)));
        assert!(err.to_string().contains("no choices"));
    }

    #[test]
    fn test_extract_reply_missing_choices_field() {
        let err = extract_reply(r#"{"object":"error"}"#).unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }

    #[test]
    fn test_extract_reply_null_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null},"finish_reason":"length"}]}"#;
        let err = extract_reply(body).unwrap_err();
        assert!(err.to_string().contains("finish_reason=length"));
    }

    #[test]
    fn test_extract_reply_not_json() {
        let err = extract_reply("<html>gateway</html>").unwrap_err();
        assert!(err.to_string().contains("Failed to parse OpenAI API response"));
    }

    #[test]
    fn test_explicit_key_is_used() {
        assert_eq!(resolve_api_key(Some("sk-test".to_string())).as_deref(), Some("sk-test"));
        let provider = OpenAIProvider::new(Some("sk-test".to_string())).unwrap();
        assert_eq!(provider.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_debug_output_hides_key() {
        let provider =
            OpenAIProvider::from_config(Some("sk-secret".to_string()), "http://127.0.0.1:1").unwrap();
        let rendered = format!("{:?}", provider);
        assert!(rendered.contains("api_key_set: true"));
        assert!(!rendered.contains("sk-secret"));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let provider = OpenAIProvider::from_config(None, "http://127.0.0.1:1").unwrap();
        let err = provider.generate("hello").await.unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "OpenAI API key not configured");
    }
}
