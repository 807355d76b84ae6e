//! HTTP API handlers for cscan-ingest

pub mod channels;
pub mod contacts;
pub mod export;
pub mod health;
pub mod ocr;
pub mod ui;

pub use channels::channel_routes;
pub use contacts::contact_routes;
pub use export::export_routes;
pub use health::health_routes;
pub use ocr::ocr_routes;
pub use ui::ui_routes;
