//! Extractor adapters for biogate.
//!
//! This crate provides:
//! - HTTP client for an inference sidecar serving face, voice and lip models
//! - Placeholder extractor used when no sidecar is configured

pub mod http_client;
pub mod unavailable;
pub mod wire;

use std::sync::Arc;
use std::time::Duration;

use biogate_core::config::ExtractorConfig;
use biogate_core::traits::{FaceFeatureExtractor, LipLandmarkExtractor, VoiceFeatureExtractor};
use biogate_core::Result;

pub use http_client::HttpExtractorClient;
pub use unavailable::UnavailableExtractor;

/// The three extractors the service needs, behind trait objects.
#[derive(Clone)]
pub struct Extractors {
    pub face: Arc<dyn FaceFeatureExtractor>,
    pub voice: Arc<dyn VoiceFeatureExtractor>,
    pub landmarks: Arc<dyn LipLandmarkExtractor>,
}

impl Extractors {
    /// Use one implementation for every modality.
    pub fn uniform<E>(extractor: Arc<E>) -> Self
    where
        E: FaceFeatureExtractor + VoiceFeatureExtractor + LipLandmarkExtractor + 'static,
    {
        Self {
            face: extractor.clone(),
            voice: extractor.clone(),
            landmarks: extractor,
        }
    }
}

/// Build extractors from configuration.
///
/// Without a base URL every extractor call fails with `ExtractorUnavailable`.
pub fn create_extractors(config: &ExtractorConfig) -> Result<Extractors> {
    let Some(base_url) = config.base_url.as_deref().filter(|u| !u.trim().is_empty()) else {
        tracing::warn!("No extractor base URL configured; biometric extraction is disabled");
        return Ok(Extractors::uniform(Arc::new(UnavailableExtractor::new())));
    };

    let mut client = HttpExtractorClient::new(base_url, Duration::from_millis(config.timeout_ms))?;
    if let Some(key) = config.api_key.clone() {
        client = client.with_api_key(key);
    }

    tracing::info!(base_url = %base_url, timeout_ms = config.timeout_ms, "Extractor sidecar configured");
    Ok(Extractors::uniform(Arc::new(client)))
}
