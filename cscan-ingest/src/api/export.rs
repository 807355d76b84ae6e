//! CSV export API handlers
//!
//! GET /api/export downloads the stored contacts; POST /api/export downloads
//! the posted rows instead (for exporting unsaved edits from the UI).

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use cscan_common::ContactRecord;
use serde::Deserialize;

use crate::db::contacts;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /api/export request
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub rows: Vec<ContactRecord>,
}

/// GET /api/export
///
/// CSV attachment of all stored contacts, newest id first.
pub async fn export_stored(State(state): State<AppState>) -> ApiResult<Response> {
    let stored = contacts::list_all(&state.db).await?;
    let rows: Vec<ContactRecord> = stored
        .into_iter()
        .map(|c| ContactRecord {
            date: c.date,
            display_name: c.display_name,
            channel: c.channel,
            note: c.note,
        })
        .collect();
    Ok(csv_attachment(rows_to_csv(&rows)?))
}

/// POST /api/export
///
/// CSV attachment of the posted rows.
pub async fn export_rows(Json(request): Json<ExportRequest>) -> ApiResult<Response> {
    Ok(csv_attachment(rows_to_csv(&request.rows)?))
}

/// Serialize rows to CSV with a header row.
fn rows_to_csv(rows: &[ContactRecord]) -> Result<Vec<u8>, ApiError> {
    // UTF-8 BOM so spreadsheet applications detect the encoding
    let buffer = vec![0xEF, 0xBB, 0xBF];
    let mut writer = csv::Writer::from_writer(buffer);

    writer
        .write_record(["date", "display_name", "channel", "note"])
        .map_err(|e| ApiError::Internal(format!("CSV write failed: {}", e)))?;
    for row in rows {
        writer
            .write_record([&row.date, &row.display_name, &row.channel, &row.note])
            .map_err(|e| ApiError::Internal(format!("CSV write failed: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| ApiError::Internal(format!("CSV write failed: {}", e)))
}

/// Wrap CSV bytes as a file download response.
fn csv_attachment(bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"contacts.csv\"",
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Build export routes
pub fn export_routes() -> Router<AppState> {
    Router::new().route("/api/export", get(export_stored).post(export_rows))
}
