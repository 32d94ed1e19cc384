// Google Gemini provider
//
// The Gemini client is synchronous (reqwest's blocking client), so every call
// is handed to tokio's blocking pool and awaited there. That keeps slow
// generations from stalling other requests on the async workers. Unlike the
// OpenAI provider there is no request timeout.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::error::ProviderError;
use crate::config::constants::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::config::non_blank;

const BACKEND: &str = "Gemini";

/// Environment variable consulted when no key is passed in.
pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configured, synchronous Gemini REST client.
///
/// Must only be called from a context that may block (a blocking-pool thread
/// or plain synchronous code such as the CLI).
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| ProviderError::transport(BACKEND, e))?;

        Ok(Self {
            http,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// `POST /models/{model}:generateContent` with a single user turn.
    pub fn generate_content(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .map_err(|e| ProviderError::transport(BACKEND, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Http {
                backend: BACKEND,
                status,
                body,
            });
        }

        response.json().map_err(|e| {
            ProviderError::response_shape(format!("Failed to parse Gemini API response: {}", e))
        })
    }

    /// `GET /models` - every model visible to this key.
    pub fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError> {
        let url = format!("{}/models", self.base_url);

        let response = self
            .http
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .map_err(|e| ProviderError::transport(BACKEND, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Http {
                backend: BACKEND,
                status,
                body,
            });
        }

        let listing: ListModelsResponse = response.json().map_err(|e| {
            ProviderError::response_shape(format!("Failed to parse Gemini model list: {}", e))
        })?;
        Ok(listing.models)
    }
}

/// Google Gemini provider
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Arc<GeminiClient>,
    model: String,
}

impl GeminiProvider {
    /// Create a provider against the public Gemini endpoint.
    ///
    /// Fails immediately when neither `api_key` nor `GEMINI_API_KEY` is set.
    pub fn new(api_key: Option<String>, model: Option<String>) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, model, DEFAULT_GEMINI_BASE_URL)
    }

    pub fn with_base_url(
        api_key: Option<String>,
        model: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        Self::from_config(resolve_api_key(api_key), model, base_url)
    }

    /// Build from already-resolved settings. The environment is not consulted.
    pub fn from_config(
        api_key: Option<String>,
        model: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let api_key = non_blank(api_key)
            .ok_or_else(|| ProviderError::configuration("Gemini API key not configured"))?;

        let client = GeminiClient::new(api_key, base_url)?;

        Ok(Self {
            client: Arc::new(client),
            model: normalize_model_name(model),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.generate_inner(prompt)
            .await
            .map_err(ProviderError::into_gemini)
    }

    async fn generate_inner(&self, prompt: &str) -> Result<String, ProviderError> {
        let client = Arc::clone(&self.client);
        let model = self.model.clone();
        let prompt = prompt.to_string();

        tracing::debug!(model = %model, prompt_chars = prompt.len(), "Dispatching Gemini call to blocking pool");

        let response = tokio::task::spawn_blocking(move || client.generate_content(&model, &prompt))
            .await
            .map_err(|e| ProviderError::Transport(format!("Gemini worker task failed: {}", e)))??;

        response.into_text()
    }
}

/// Explicit key first, then `GEMINI_API_KEY`.
pub fn resolve_api_key(api_key: Option<String>) -> Option<String> {
    non_blank(api_key).or_else(|| non_blank(std::env::var(GEMINI_KEY_ENV).ok()))
}

/// Blank means default; the REST path already supplies the `models/` segment.
fn normalize_model_name(model: Option<String>) -> String {
    let model = non_blank(model).unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
    let model = model.trim();
    model.strip_prefix("models/").unwrap_or(model).to_string()
}

// Gemini API types

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Safety feedback on the prompt itself; kept raw for diagnostics
    pub prompt_feedback: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, or a shape error naming whatever
    /// diagnostic the API supplied (prompt feedback or finish reason).
    pub fn into_text(self) -> Result<String, ProviderError> {
        let candidate = match self.candidates.into_iter().next() {
            Some(c) => c,
            None => {
                let feedback = self
                    .prompt_feedback
                    .map(|f| f.to_string())
                    .unwrap_or_else(|| "none".to_string());
                return Err(ProviderError::response_shape(format!(
                    "Gemini returned no candidates. prompt_feedback={}",
                    feedback
                )));
            }
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            return Err(ProviderError::response_shape(format!(
                "Gemini returned empty content. finish_reason={}",
                candidate.finish_reason.as_deref().unwrap_or("none")
            )));
        }

        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

/// One entry of the model listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_generation_methods: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> GenerateContentResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_text_from_first_candidate() {
        let resp = parse(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"world"}]},"finishReason":"STOP"}]}"#,
        );
        assert_eq!(resp.into_text().unwrap(), "Hello world");
    }

    #[test]
    fn test_no_candidates_reports_prompt_feedback() {
        let resp = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        let msg = resp.into_text().unwrap_err().to_string();
        assert!(msg.contains("no candidates"));
        assert!(msg.contains("SAFETY"));
    }

    #[test]
    fn test_no_candidates_without_feedback() {
        let resp = parse(r#"{"candidates":[]}"#);
        let msg = resp.into_text().unwrap_err().to_string();
        assert!(msg.ends_with("prompt_feedback=none"));
    }

    #[test]
    fn test_empty_parts_reports_finish_reason() {
        let resp = parse(r#"{"candidates":[{"content":{"parts":[]},"finishReason":"MAX_TOKENS"}]}"#);
        let msg = resp.into_text().unwrap_err().to_string();
        assert!(msg.contains("empty content"));
        assert!(msg.contains("finish_reason=MAX_TOKENS"));
    }

    #[test]
    fn test_missing_content_reports_finish_reason() {
        let resp = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        let msg = resp.into_text().unwrap_err().to_string();
        assert!(msg.contains("finish_reason=SAFETY"));
    }

    #[test]
    fn test_model_name_normalization() {
        assert_eq!(normalize_model_name(None), "gemini-2.5-flash");
        assert_eq!(normalize_model_name(Some("  ".to_string())), "gemini-2.5-flash");
        assert_eq!(
            normalize_model_name(Some("models/gemini-1.5-pro".to_string())),
            "gemini-1.5-pro"
        );
        assert_eq!(
            normalize_model_name(Some("gemini-2.0-flash".to_string())),
            "gemini-2.0-flash"
        );
    }

    #[test]
    fn test_from_config_requires_key() {
        let err = GeminiProvider::from_config(Some("  ".to_string()), None, "http://127.0.0.1:1")
            .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "Gemini API key not configured");
    }

    #[test]
    fn test_debug_output_hides_key() {
        let provider =
            GeminiProvider::from_config(Some("AIza-secret".to_string()), None, "http://127.0.0.1:1")
                .unwrap();
        let rendered = format!("{:?}", provider);
        assert!(rendered.contains("gemini-2.5-flash"));
        assert!(rendered.contains("127.0.0.1:1"));
        assert!(!rendered.contains("AIza-secret"));
    }

    #[test]
    fn test_request_body_shape() {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: "hi" }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }
}
