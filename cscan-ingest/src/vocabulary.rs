//! Channel vocabulary cache
//!
//! The vocabulary is the ordered list of known channel labels, loaded from
//! the first column of a CSV file (first row is a header row; blank cells
//! are dropped; order is preserved — label order is the channel splitter's
//! match priority). The loaded list is cached process-wide; uploading a new
//! file invalidates the cache so the next read reloads. Readers racing an
//! invalidation may observe the old or the new vocabulary.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Cached channel vocabulary backed by a CSV file
#[derive(Clone)]
pub struct VocabularyCache {
    path: PathBuf,
    cache: Arc<RwLock<Option<Vec<String>>>>,
}

impl VocabularyCache {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current vocabulary, loading from the file on a cold cache.
    ///
    /// A missing file yields an empty vocabulary (every line then parses to
    /// no channel match), not an error.
    pub async fn get(&self) -> Vec<String> {
        if let Some(labels) = self.cache.read().await.as_ref() {
            return labels.clone();
        }

        let labels = load_labels(&self.path);
        debug!(labels = labels.len(), "vocabulary loaded from {}", self.path.display());
        *self.cache.write().await = Some(labels.clone());
        labels
    }

    /// Clear the cache so the next read reloads from the file.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }
}

/// Read channel labels from the first CSV column.
fn load_labels(path: &Path) -> Vec<String> {
    if !path.exists() {
        warn!("Vocabulary file not found: {}", path.display());
        return Vec::new();
    }

    let mut reader = match csv::ReaderBuilder::new().flexible(true).from_path(path) {
        Ok(reader) => reader,
        Err(e) => {
            warn!("Failed to open vocabulary file {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let mut labels = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping malformed vocabulary row: {}", e);
                continue;
            }
        };
        if let Some(cell) = record.get(0) {
            let label = cell.trim();
            if !label.is_empty() {
                labels.push(label.to_string());
            }
        }
    }
    labels
}
