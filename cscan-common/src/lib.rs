//! # ContactScan Common Library
//!
//! Shared code for the ContactScan services including:
//! - The text-line reconstruction core (fragment filter, date segmenter,
//!   channel splitter, batch record assembler)
//! - Configuration loading and data folder resolution
//! - Common error types

pub mod config;
pub mod error;
pub mod parse;

pub use error::{Error, Result};
pub use parse::{ContactRecord, RawFragment};
