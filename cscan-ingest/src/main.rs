//! cscan-ingest - Contact Ingest Service
//!
//! Accepts chat-contact-list screenshots, sends each image to the external
//! recognizer service, reconstructs structured contact records from the
//! recognized text, and persists them in SQLite. Also manages the channel
//! vocabulary file and CSV export of stored contacts.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cscan_ingest::ocr::RemoteOcr;
use cscan_ingest::vocabulary::VocabularyCache;
use cscan_ingest::AppState;

const LISTEN_ADDR: &str = "127.0.0.1:5731";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting cscan-ingest (Contact Ingest) service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Step 1: Resolve data folder (CLI arg -> env -> TOML -> OS default)
    let cli_arg = std::env::args().nth(1);
    let toml_config = cscan_common::config::load_toml_config();
    let data_folder = cscan_common::config::resolve_data_folder(cli_arg.as_deref(), &toml_config)?;

    // Step 2: Create data folder if missing
    std::fs::create_dir_all(&data_folder)
        .map_err(|e| anyhow::anyhow!("Failed to initialize data folder: {}", e))?;

    // Step 3: Open or create database
    let db_path = data_folder.join("cscan.db");
    info!("Database: {}", db_path.display());
    let db_pool = cscan_ingest::db::init_database_pool(&db_path).await?;
    info!("Database connection established");

    // Step 4: Vocabulary cache and recognizer capability
    let vocabulary_path = cscan_common::config::resolve_vocabulary_path(&data_folder, &toml_config);
    info!("Vocabulary file: {}", vocabulary_path.display());
    let vocabulary = VocabularyCache::new(vocabulary_path);

    let ocr_url = cscan_common::config::resolve_ocr_url(&toml_config);
    info!("Recognizer endpoint: {}", ocr_url);
    let recognizer = Arc::new(RemoteOcr::new(ocr_url));

    // Create application state
    let state = AppState::new(db_pool, vocabulary, recognizer);

    // Build router
    let app = cscan_ingest::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(LISTEN_ADDR).await?;
    info!("Listening on http://{}", LISTEN_ADDR);
    info!("Health check: http://{}/health", LISTEN_ADDR);

    axum::serve(listener, app).await?;

    Ok(())
}
