use crate::state::AppState;
use anyhow::Context;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod health;
pub mod notify;
pub mod webhook;

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_check))
        .route("/health", get(health::health_check))
        .route("/webhook", post(webhook::webhook))
        .route("/notify", post(notify::notify))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(
    state: AppState,
    port: u16,
    mut shutdown_signal: tokio::sync::broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown_signal.recv().await;
            info!("HTTP server received shutdown signal, stopping...");
        })
        .await
        .context("HTTP server failed")?;
    Ok(())
}
