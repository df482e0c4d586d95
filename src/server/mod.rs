pub mod api;

use crate::error::Result;
use crate::services::{NaverClient, PriceSource, RunStore, SharedRunStore};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub runs: SharedRunStore,
    pub source: Arc<dyn PriceSource>,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index_handler))
        .route("/analyze", post(api::analyze_handler))
        .route("/progress", get(api::progress_handler))
        .route("/result", get(api::result_handler))
        .with_state(state)
}

/// Start the axum server
pub async fn serve(port: u16) -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    tracing::info!("Starting macd-screener server");

    let app_state = AppState {
        runs: Arc::new(RunStore::new()),
        source: Arc::new(NaverClient::new()?),
    };

    tracing::info!("Registering routes:");
    tracing::info!("  GET  /          (upload form)");
    tracing::info!("  POST /analyze   (submit ticker list)");
    tracing::info!("  GET  /progress  (?run_id=...)");
    tracing::info!("  GET  /result    (?run_id=...)");

    let app = router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| crate::error::AppError::Config(format!("Failed to bind {}: {}", addr, e)))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| crate::error::AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}
