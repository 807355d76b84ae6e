//! Channel vocabulary API handlers
//!
//! GET /api/channels reports whether a vocabulary file is present;
//! POST /api/channels replaces it and invalidates the cache so the next
//! parse run observes the new labels.

use axum::{
    extract::{Multipart, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/channels response
#[derive(Debug, Serialize)]
pub struct ChannelStatusResponse {
    pub exists: bool,
    pub path: String,
}

/// POST /api/channels response
#[derive(Debug, Serialize)]
pub struct ChannelUploadResponse {
    pub status: String,
    pub path: String,
}

/// GET /api/channels
///
/// Report whether the vocabulary file exists and where.
pub async fn channel_status(State(state): State<AppState>) -> Json<ChannelStatusResponse> {
    let path = state.vocabulary.path();
    let exists = path.exists();
    Json(ChannelStatusResponse {
        exists,
        path: if exists {
            path.display().to_string()
        } else {
            String::new()
        },
    })
}

/// POST /api/channels
///
/// Upload a replacement vocabulary file (multipart field `file`, .csv only).
pub async fn upload_channels(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ChannelUploadResponse>> {
    let mut upload: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart request: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(|name| name.to_string())
            .unwrap_or_default();
        if filename.is_empty() {
            return Err(ApiError::BadRequest("Empty filename".to_string()));
        }
        if !filename.to_ascii_lowercase().ends_with(".csv") {
            return Err(ApiError::BadRequest("Only .csv allowed".to_string()));
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file field: {}", e)))?;
        upload = Some(data.to_vec());
    }

    let Some(data) = upload else {
        return Err(ApiError::BadRequest("No file provided".to_string()));
    };

    let path = state.vocabulary.path().to_path_buf();
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, &data).await?;

    // next read reloads from the new file
    state.vocabulary.invalidate().await;
    info!("Vocabulary file replaced: {}", path.display());

    Ok(Json(ChannelUploadResponse {
        status: "ok".to_string(),
        path: path.display().to_string(),
    }))
}

/// Build channel vocabulary routes
pub fn channel_routes() -> Router<AppState> {
    Router::new().route("/api/channels", get(channel_status).post(upload_channels))
}
