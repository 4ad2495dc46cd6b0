//! HTTP boundary: parameter parsing and response shaping over [`Pipeline`]

mod error;
mod routes;

pub use error::{ApiError, ErrorBody};
pub use routes::{build_router, AppState};

use crate::pipeline::Pipeline;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Router with permissive CORS and request tracing
pub fn app(pipeline: Arc<Pipeline>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    build_router(AppState::new(pipeline))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Serve until Ctrl-C
pub async fn serve(pipeline: Arc<Pipeline>, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Starting HTTP server on {}", listener.local_addr()?);

    axum::serve(listener, app(pipeline))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
