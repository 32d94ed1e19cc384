// HTTP server module
// Serves the teaching endpoint over axum

pub mod error;
mod handlers;
pub mod types;

pub use error::ApiError;
pub use handlers::{create_router, handle_ask, health_check};
pub use types::{AskRequest, AskResponse, ErrorBody, HealthResponse};

use anyhow::{Context, Result};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::constants::{MAX_REQUEST_BODY_BYTES, SERVICE_NAME};
use crate::config::Settings;
use crate::providers::Provider;
use crate::tutor::TutorService;

/// Shared, read-only request state
pub struct AppState {
    /// Environment name echoed by the health endpoint
    env: String,
    tutor: TutorService,
}

impl AppState {
    pub fn new(env: impl Into<String>, provider: Arc<Provider>) -> Self {
        Self {
            env: env.into(),
            tutor: TutorService::new(provider),
        }
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn tutor(&self) -> &TutorService {
        &self.tutor
    }
}

/// Router with the production middleware stack applied.
pub fn build_app(state: Arc<AppState>) -> axum::Router {
    create_router(state)
        .layer(axum::extract::DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

/// Main server structure
pub struct TutorServer {
    bind_address: String,
    state: Arc<AppState>,
}

impl TutorServer {
    /// Create a server around an already-constructed provider.
    pub fn new(settings: &Settings, provider: Provider) -> Self {
        Self {
            bind_address: settings.bind_address(),
            state: Arc::new(AppState::new(settings.env.clone(), Arc::new(provider))),
        }
    }

    /// Bind and serve until the process is stopped.
    pub async fn serve(self) -> Result<()> {
        let addr = self.bind_address;

        tracing::info!(
            env = %self.state.env(),
            provider = self.state.tutor().provider().name(),
            "Starting {} server on {}",
            SERVICE_NAME,
            addr
        );

        let app = build_app(self.state);

        let listener = tokio::net::TcpListener::bind(addr.as_str())
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server error")?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
