//! HTTP boundary
//!
//! Three operations over the snapshot store and the served root:
//!
//! - `GET  /manifest`             current manifest as JSON
//! - `POST /manifest/recalculate` rebuild and publish a new manifest
//! - `GET  /files/{path}`         stream one file by relative path

mod handlers;

use crate::store::SnapshotStore;
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state for web handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SnapshotStore>,
}

impl AppState {
    pub fn new(store: SnapshotStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/manifest", get(handlers::get_manifest))
        .route("/manifest/recalculate", post(handlers::recalculate))
        // `{*path}` never matches an empty remainder
        .route("/files", get(handlers::missing_file_path))
        .route("/files/", get(handlers::missing_file_path))
        .route("/files/{*path}", get(handlers::serve_file))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Server starting on {}", addr);
    info!("  GET  /manifest             - get current manifest");
    info!("  POST /manifest/recalculate - recalculate manifest");
    info!("  GET  /files/{{path}}         - download file");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Shutdown complete");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received SIGINT, shutting down...");
        }
        _ = terminate() => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::warn!("Failed to install SIGTERM handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
