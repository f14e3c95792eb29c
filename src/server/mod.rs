//! HTTP front-end for the analysis pipeline.

mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analyzer::Analyzer;

pub struct AppState {
    pub analyzer: Analyzer,
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::service_info))
        .route("/health", get(routes::health))
        .route("/api/analyze", post(routes::analyze))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is terminated.
pub async fn start_server(port: u16, analyzer: Analyzer) -> anyhow::Result<()> {
    let state = Arc::new(AppState { analyzer });
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
