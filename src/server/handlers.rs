//! Request handlers

use super::AppState;
use crate::error::FileRequestError;
use crate::tree::path::sanitize_request_path;
use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub(super) struct RecalculateResponse {
    status: &'static str,
    files: usize,
}

impl IntoResponse for FileRequestError {
    fn into_response(self) -> Response {
        let status = match self {
            FileRequestError::EmptyPath | FileRequestError::PathViolation(_) => {
                StatusCode::BAD_REQUEST
            }
            FileRequestError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, self.to_string()).into_response()
    }
}

/// GET /manifest
pub(super) async fn get_manifest(State(state): State<AppState>) -> Response {
    let snapshot = state.store.current_snapshot();

    match serde_json::to_vec(snapshot.as_ref()) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            error!("Failed to encode manifest: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// POST /manifest/recalculate
pub(super) async fn recalculate(State(state): State<AppState>) -> Response {
    let store = Arc::clone(&state.store);

    match tokio::task::spawn_blocking(move || store.recalculate()).await {
        Ok(Ok(files)) => Json(RecalculateResponse {
            status: "ok",
            files,
        })
        .into_response(),
        Ok(Err(e)) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        Err(e) => {
            error!("Recalculation task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Recalculation task failed: {}", e),
            )
                .into_response()
        }
    }
}

/// GET /files and GET /files/
pub(super) async fn missing_file_path() -> Response {
    FileRequestError::EmptyPath.into_response()
}

/// GET /files/{*path}
pub(super) async fn serve_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
    request: Request,
) -> Response {
    let full_path = match sanitize_request_path(state.store.root(), &path) {
        Ok(full_path) => full_path,
        Err(e) => {
            warn!(path = %path, "Rejected file request: {}", e);
            return e.into_response();
        }
    };

    // No directory listings
    if let Ok(metadata) = tokio::fs::metadata(&full_path).await {
        if metadata.is_dir() {
            return FileRequestError::NotFound(path).into_response();
        }
    }

    match ServeFile::new(&full_path).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
