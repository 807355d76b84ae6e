//! Contact persistence API handlers
//!
//! GET /api/contacts, POST /api/contacts/bulk, DELETE /api/contacts/:id

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use cscan_common::ContactRecord;
use serde::{Deserialize, Serialize};

use crate::db::contacts::{self, StoredContact};
use crate::error::ApiResult;
use crate::AppState;

/// GET /api/contacts response
#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub rows: Vec<StoredContact>,
}

/// One row in a POST /api/contacts/bulk request
///
/// A row with an id updates that contact; a row without an id inserts a
/// new one. Missing text fields default to empty.
#[derive(Debug, Deserialize)]
pub struct BulkContactRow {
    pub id: Option<i64>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub note: String,
}

/// POST /api/contacts/bulk request
#[derive(Debug, Deserialize)]
pub struct BulkSaveRequest {
    #[serde(default)]
    pub rows: Vec<BulkContactRow>,
}

/// POST /api/contacts/bulk response
#[derive(Debug, Serialize)]
pub struct BulkSaveResponse {
    pub rows: Vec<StoredContact>,
}

/// DELETE /api/contacts/:id response
#[derive(Debug, Serialize)]
pub struct DeleteContactResponse {
    pub status: String,
}

/// GET /api/contacts
///
/// List all stored contacts, newest id first.
pub async fn list_contacts(State(state): State<AppState>) -> ApiResult<Json<ContactListResponse>> {
    let rows = contacts::list_all(&state.db).await?;
    Ok(Json(ContactListResponse { rows }))
}

/// POST /api/contacts/bulk
///
/// Save a batch of edited rows, returning each saved row with its id.
pub async fn save_contacts(
    State(state): State<AppState>,
    Json(request): Json<BulkSaveRequest>,
) -> ApiResult<Json<BulkSaveResponse>> {
    let mut saved = Vec::with_capacity(request.rows.len());

    for row in request.rows {
        let record = ContactRecord {
            date: row.date,
            display_name: row.display_name,
            channel: row.channel,
            note: row.note,
        };
        let id = match row.id {
            Some(id) => {
                contacts::update(&state.db, id, &record).await?;
                id
            }
            None => contacts::insert(&state.db, &record).await?,
        };
        saved.push(StoredContact {
            id,
            date: record.date,
            display_name: record.display_name,
            channel: record.channel,
            note: record.note,
        });
    }

    Ok(Json(BulkSaveResponse { rows: saved }))
}

/// DELETE /api/contacts/:id
///
/// Delete one contact. Deleting a nonexistent id still responds ok.
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(contact_id): Path<i64>,
) -> ApiResult<Json<DeleteContactResponse>> {
    contacts::delete(&state.db, contact_id).await?;
    Ok(Json(DeleteContactResponse {
        status: "ok".to_string(),
    }))
}

/// Build contact routes
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/api/contacts", get(list_contacts))
        .route("/api/contacts/bulk", post(save_contacts))
        .route("/api/contacts/:id", delete(delete_contact))
}
