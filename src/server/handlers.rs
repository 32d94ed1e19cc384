// HTTP handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use super::error::ApiError;
use super::types::{AskRequest, AskResponse, HealthResponse};
use super::AppState;
use crate::config::constants::SERVICE_NAME;

/// Build the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/v1/ask", post(handle_ask))
        .with_state(state)
}

/// `GET /` - liveness plus the configured environment name.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        service: SERVICE_NAME.to_string(),
        env: state.env().to_string(),
    })
}

/// `POST /v1/ask` - build a teaching prompt and answer it with the configured provider.
pub async fn handle_ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected ask request");
        ApiError::from(rejection)
    })?;

    let answer = state
        .tutor()
        .answer(
            &request.user_id,
            &request.topic,
            &request.explanation_level,
            request.detail_level.as_deref(),
        )
        .await?;

    Ok(Json(AskResponse {
        reply: answer.reply,
        model: answer.model,
    }))
}
