//! Contact table operations

use cscan_common::{ContactRecord, Result};
use serde::Serialize;
use sqlx::{Pool, Sqlite};

/// One persisted contact row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct StoredContact {
    pub id: i64,
    pub date: String,
    pub display_name: String,
    pub channel: String,
    pub note: String,
}

/// List all contacts, newest id first
pub async fn list_all(db: &Pool<Sqlite>) -> Result<Vec<StoredContact>> {
    let rows = sqlx::query_as::<_, StoredContact>(
        "SELECT id, date, display_name, channel, note FROM contacts ORDER BY id DESC",
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Insert a new contact, returning the assigned id
pub async fn insert(db: &Pool<Sqlite>, record: &ContactRecord) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO contacts (date, display_name, channel, note) VALUES (?, ?, ?, ?)",
    )
    .bind(&record.date)
    .bind(&record.display_name)
    .bind(&record.channel)
    .bind(&record.note)
    .execute(db)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Update an existing contact by id
///
/// Updating a nonexistent id is a no-op, matching the bulk-save contract.
pub async fn update(db: &Pool<Sqlite>, id: i64, record: &ContactRecord) -> Result<()> {
    sqlx::query("UPDATE contacts SET date = ?, display_name = ?, channel = ?, note = ? WHERE id = ?")
        .bind(&record.date)
        .bind(&record.display_name)
        .bind(&record.channel)
        .bind(&record.note)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

/// Delete a contact by id (idempotent)
pub async fn delete(db: &Pool<Sqlite>, id: i64) -> Result<()> {
    sqlx::query("DELETE FROM contacts WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}
