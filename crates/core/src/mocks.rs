//! Mock implementations of core traits for testing.
//!
//! These stand in for the external extractors and the gallery store so the
//! matching and fusion layers can be exercised without trained models.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::{
    traits::{FaceFeatureExtractor, GalleryStore, LipLandmarkExtractor, VoiceFeatureExtractor},
    types::{FaceImage, FeatureVector, Gallery, LandmarkTrack, Waveform},
    Error, Result,
};

// =============================================================================
// Mock Face Extractor
// =============================================================================

/// Face extractor that returns the same encodings for every image.
pub struct MockFaceExtractor {
    encodings: Vec<FeatureVector>,
    call_count: AtomicUsize,
}

impl MockFaceExtractor {
    /// Return `encodings` for every image.
    pub fn new(encodings: Vec<FeatureVector>) -> Self {
        Self {
            encodings,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Report a single detected face.
    pub fn single(encoding: FeatureVector) -> Self {
        Self::new(vec![encoding])
    }

    /// Report no face in any image.
    pub fn no_face() -> Self {
        Self::new(Vec::new())
    }

    /// Get the number of calls made to this mock.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FaceFeatureExtractor for MockFaceExtractor {
    async fn encode(&self, _image: &FaceImage) -> Result<Vec<FeatureVector>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.encodings.clone())
    }
}

// =============================================================================
// Mock Voice Extractor
// =============================================================================

/// Voice extractor that returns a fixed embedding.
pub struct MockVoiceExtractor {
    embedding: FeatureVector,
    call_count: AtomicUsize,
}

impl MockVoiceExtractor {
    pub fn new(embedding: FeatureVector) -> Self {
        Self {
            embedding,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Get the number of calls made to this mock.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VoiceFeatureExtractor for MockVoiceExtractor {
    async fn embed(&self, _waveform: &Waveform) -> Result<FeatureVector> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.embedding.clone())
    }
}

// =============================================================================
// Mock Landmark Extractor
// =============================================================================

/// Landmark extractor returning a scripted track.
///
/// Records the paths it was handed and whether each existed at call time,
/// so tests can check that staged media is present during extraction and
/// gone afterwards.
pub struct MockLandmarkExtractor {
    track: LandmarkTrack,
    seen: Mutex<Vec<(PathBuf, bool)>>,
}

impl MockLandmarkExtractor {
    pub fn new(track: LandmarkTrack) -> Self {
        Self {
            track,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Paths received so far, with their existence at call time.
    pub fn seen_paths(&self) -> Vec<(PathBuf, bool)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl LipLandmarkExtractor for MockLandmarkExtractor {
    async fn track(&self, video: &Path) -> Result<LandmarkTrack> {
        self.seen
            .lock()
            .unwrap()
            .push((video.to_path_buf(), video.exists()));
        Ok(self.track.clone())
    }
}

// =============================================================================
// Failing Extractor
// =============================================================================

/// Extractor that fails every call, for exercising error paths.
pub struct FailingExtractor {
    message: String,
    seen: Mutex<Vec<PathBuf>>,
}

impl FailingExtractor {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Video paths received by `track`.
    pub fn seen_paths(&self) -> Vec<PathBuf> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl FaceFeatureExtractor for FailingExtractor {
    async fn encode(&self, _image: &FaceImage) -> Result<Vec<FeatureVector>> {
        Err(Error::extractor(self.message.clone()))
    }
}

#[async_trait]
impl VoiceFeatureExtractor for FailingExtractor {
    async fn embed(&self, _waveform: &Waveform) -> Result<FeatureVector> {
        Err(Error::extractor(self.message.clone()))
    }
}

#[async_trait]
impl LipLandmarkExtractor for FailingExtractor {
    async fn track(&self, video: &Path) -> Result<LandmarkTrack> {
        self.seen.lock().unwrap().push(video.to_path_buf());
        Err(Error::extractor(self.message.clone()))
    }
}

// =============================================================================
// Mock Gallery Store
// =============================================================================

/// Gallery store serving a prebuilt gallery.
pub struct MockGalleryStore {
    gallery: Gallery,
}

impl MockGalleryStore {
    pub fn new(gallery: Gallery) -> Self {
        Self { gallery }
    }
}

#[async_trait]
impl GalleryStore for MockGalleryStore {
    async fn load(&self) -> Result<Gallery> {
        Ok(self.gallery.clone())
    }
}
