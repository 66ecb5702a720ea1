//! Feature extractor traits.
//!
//! Implementations wrap trained networks that live outside this service.
//! Calls may block on CPU-bound inference; callers apply their own timeouts.

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;
use crate::types::{FaceImage, FeatureVector, LandmarkTrack, Waveform};

/// Face encoder producing 128-dimensional vectors.
#[async_trait]
pub trait FaceFeatureExtractor: Send + Sync {
    /// Encode every face found in the image, in detection order.
    ///
    /// Returns an empty list when no face is present.
    async fn encode(&self, image: &FaceImage) -> Result<Vec<FeatureVector>>;
}

/// Speaker encoder producing 256-dimensional vectors.
#[async_trait]
pub trait VoiceFeatureExtractor: Send + Sync {
    /// Embed a 16 kHz mono waveform of at least one second.
    async fn embed(&self, waveform: &Waveform) -> Result<FeatureVector>;
}

/// Facial landmark detector run over every frame of a video file.
#[async_trait]
pub trait LipLandmarkExtractor: Send + Sync {
    /// Track lip landmarks through the video stored at `video`.
    async fn track(&self, video: &Path) -> Result<LandmarkTrack>;
}
