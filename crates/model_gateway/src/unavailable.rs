use async_trait::async_trait;
use std::path::Path;

use biogate_core::{
    traits::{FaceFeatureExtractor, LipLandmarkExtractor, VoiceFeatureExtractor},
    types::{FaceImage, FeatureVector, LandmarkTrack, Waveform},
    Error, Result,
};

const REASON: &str = "no extractor endpoint configured";

/// Stand-in for every extractor when no inference backend is reachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableExtractor;

impl UnavailableExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FaceFeatureExtractor for UnavailableExtractor {
    async fn encode(&self, _image: &FaceImage) -> Result<Vec<FeatureVector>> {
        Err(Error::ExtractorUnavailable(REASON.into()))
    }
}

#[async_trait]
impl VoiceFeatureExtractor for UnavailableExtractor {
    async fn embed(&self, _waveform: &Waveform) -> Result<FeatureVector> {
        Err(Error::ExtractorUnavailable(REASON.into()))
    }
}

#[async_trait]
impl LipLandmarkExtractor for UnavailableExtractor {
    async fn track(&self, _video: &Path) -> Result<LandmarkTrack> {
        Err(Error::ExtractorUnavailable(REASON.into()))
    }
}
