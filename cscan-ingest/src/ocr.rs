//! Recognizer capability boundary
//!
//! The recognition engine is an external collaborator. This module defines
//! the narrow interface the parsing pipeline consumes (`Recognizer`) and
//! the production implementation (`RemoteOcr`) that posts image bytes to a
//! recognizer HTTP service and receives text fragments with confidence
//! scores. Tests swap in synthetic recognizers; nothing else in the crate
//! knows how recognition happens.

use async_trait::async_trait;
use cscan_common::RawFragment;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Recognition is a slow external call; time-box it client-side.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Recognizer failure
#[derive(Debug, Error)]
pub enum OcrError {
    /// Request failed (network, timeout, non-2xx status, decode)
    #[error("recognizer request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response decoded but violated the fragment contract
    #[error("recognizer returned invalid payload: {0}")]
    Payload(String),
}

/// Narrow interface to the external recognition engine
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Recognize text spans in one image.
    async fn recognize(&self, image: &[u8]) -> Result<Vec<RawFragment>, OcrError>;
}

/// Recognizer service response
#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    fragments: Vec<RawFragment>,
}

/// HTTP client for a remote recognizer service
///
/// Posts the image as a multipart upload and expects
/// `{ "fragments": [ { "text": ..., "confidence": ... } ] }`.
pub struct RemoteOcr {
    http_client: Client,
    endpoint: String,
}

impl RemoteOcr {
    /// Create a client for the given recognizer endpoint
    pub fn new(endpoint: String) -> Self {
        Self {
            http_client: Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            endpoint,
        }
    }
}

#[async_trait]
impl Recognizer for RemoteOcr {
    async fn recognize(&self, image: &[u8]) -> Result<Vec<RawFragment>, OcrError> {
        let part = Part::bytes(image.to_vec()).file_name("image.jpg");
        let form = Form::new().part("image", part);

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json::<RecognizeResponse>()
            .await?;

        for fragment in &response.fragments {
            if !(0.0..=1.0).contains(&fragment.confidence) {
                return Err(OcrError::Payload(format!(
                    "confidence {} out of range for fragment {:?}",
                    fragment.confidence, fragment.text
                )));
            }
        }

        debug!(
            fragments = response.fragments.len(),
            "recognizer returned fragments"
        );
        Ok(response.fragments)
    }
}
