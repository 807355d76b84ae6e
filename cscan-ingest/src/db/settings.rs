//! Settings database operations
//!
//! Provides get/set accessors for the settings table following the
//! key-value pattern, plus typed wrappers for the parse tunables.

use cscan_common::parse::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_DATE_PREFIX_CHARS};
use cscan_common::{Error, Result};
use sqlx::{Pool, Sqlite};

/// Get fragment confidence threshold
///
/// **Default:** 0.2
pub async fn get_confidence_threshold(db: &Pool<Sqlite>) -> Result<f32> {
    get_setting(db, "confidence_threshold")
        .await
        .map(|opt| opt.unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD))
}

/// Set fragment confidence threshold
pub async fn set_confidence_threshold(db: &Pool<Sqlite>, threshold: f32) -> Result<()> {
    set_setting(db, "confidence_threshold", threshold).await
}

/// Get date prefix width in characters
///
/// **Default:** 8
pub async fn get_date_prefix_chars(db: &Pool<Sqlite>) -> Result<usize> {
    get_setting(db, "date_prefix_chars")
        .await
        .map(|opt| opt.unwrap_or(DEFAULT_DATE_PREFIX_CHARS))
}

/// Set date prefix width in characters
pub async fn set_date_prefix_chars(db: &Pool<Sqlite>, chars: usize) -> Result<()> {
    set_setting(db, "date_prefix_chars", chars).await
}

/// Generic setting getter
///
/// **Returns:** Some(value) if the key exists, None if not set
pub async fn get_setting<T>(db: &Pool<Sqlite>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await?;

    match row {
        None => Ok(None),
        Some((value,)) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::Internal(format!("Setting '{}' has invalid value: {}", key, e))),
    }
}

/// Generic setting setter (insert or replace)
pub async fn set_setting<T: std::fmt::Display>(db: &Pool<Sqlite>, key: &str, value: T) -> Result<()> {
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?, ?) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value.to_string())
    .execute(db)
    .await?;
    Ok(())
}
