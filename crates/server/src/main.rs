use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use designer_lib::state::DesignerSettings;
use designer_lib::tuning::TuningTable;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

mod ai;
mod config;
mod routes;
mod sanitize;

use config::{AiConfig, ServerConfig};

/// Запас сверх лимита загрузки, чтобы превышение отдавалось как 413 с текстом
const BODY_LIMIT: usize = 8 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub ai: Arc<AiConfig>,
    pub http: reqwest::Client,
    pub tuning: Arc<TuningTable>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/placements", post(routes::placements))
        .route("/api/uploads/svg", post(routes::upload_svg))
        .route("/api/preview", post(routes::preview))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("server=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    if config.ai.api_key.is_none() {
        tracing::warn!("AI_GATEWAY_API_KEY is not set, /api/preview will fail");
    }

    let settings = DesignerSettings::load();
    let state = AppState {
        ai: Arc::new(config.ai),
        http: reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?,
        tuning: Arc::new(settings.tuning),
    };

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("Server running on http://{}", config.addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
