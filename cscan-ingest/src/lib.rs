//! cscan-ingest library interface
//!
//! Exposes the application state and router for integration testing.

pub mod api;
pub mod db;
pub mod error;
pub mod ocr;
pub mod vocabulary;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::ocr::Recognizer;
use crate::vocabulary::VocabularyCache;

/// Screenshots are small, but phone photos of screens are not.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Cached channel vocabulary
    pub vocabulary: VocabularyCache,
    /// Recognizer capability (remote service in production, synthetic in tests)
    pub recognizer: Arc<dyn Recognizer>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(db: SqlitePool, vocabulary: VocabularyCache, recognizer: Arc<dyn Recognizer>) -> Self {
        Self {
            db,
            vocabulary,
            recognizer,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::ocr_routes())
        .merge(api::channel_routes())
        .merge(api::contact_routes())
        .merge(api::export_routes())
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
