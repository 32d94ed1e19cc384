// Wire types for the HTTP API

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// Caller identifier (logged, not stored)
    pub user_id: String,
    /// Subject to teach
    pub topic: String,
    /// "beginner", "intermediate" or "advanced"; anything else means beginner
    pub explanation_level: String,
    /// "high" or "low"; missing or anything else means low
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_level: Option<String>,
}

/// Response body for `POST /v1/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub reply: String,
    /// Type name of the provider that produced `reply`
    pub model: String,
}

/// Response body for `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub service: String,
    pub env: String,
}

/// Body of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
