//! Screenshot ingest API handler
//!
//! POST /api/ocr: recognize each uploaded image, filter the fragments, and
//! reconstruct contact records with the cached vocabulary. Batch semantics
//! are best-effort throughout: a line with no channel match is dropped, and
//! a recognizer failure on one image skips that image without failing the
//! request.

use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use cscan_common::parse::{filter_fragments, parse_batch};
use cscan_common::ContactRecord;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /api/ocr response
#[derive(Debug, Serialize)]
pub struct OcrResponse {
    pub rows: Vec<ContactRecord>,
}

/// POST /api/ocr
///
/// Multipart upload with one or more `images` fields. Responds with the
/// contact records reconstructed from all images, in upload order.
pub async fn run_ocr(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<OcrResponse>> {
    let mut images: Vec<Vec<u8>> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart request: {}", e)))?
    {
        if field.name() == Some("images") {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read image field: {}", e)))?;
            images.push(data.to_vec());
        }
    }

    if images.is_empty() {
        return Err(ApiError::BadRequest("No images provided".to_string()));
    }

    let vocabulary = state.vocabulary.get().await;
    let confidence_threshold = crate::db::settings::get_confidence_threshold(&state.db).await?;
    let date_prefix_chars = crate::db::settings::get_date_prefix_chars(&state.db).await?;

    let mut rows = Vec::new();
    for (index, image) in images.iter().enumerate() {
        match state.recognizer.recognize(image).await {
            Ok(fragments) => {
                let lines = filter_fragments(&fragments, confidence_threshold);
                debug!(
                    image = index,
                    fragments = fragments.len(),
                    lines = lines.len(),
                    "recognized image"
                );
                rows.extend(parse_batch(&lines, &vocabulary, date_prefix_chars));
            }
            Err(e) => {
                warn!(image = index, error = %e, "recognizer failed for image, skipping");
                *state.last_error.write().await = Some(e.to_string());
            }
        }
    }

    Ok(Json(OcrResponse { rows }))
}

/// Build OCR routes
pub fn ocr_routes() -> Router<AppState> {
    Router::new().route("/api/ocr", post(run_ocr))
}
