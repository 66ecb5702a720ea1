//! Lip-sync analyzer.
//!
//! A heuristic liveness signal: the variance of the lip gap over time says
//! whether the mouth moved, and the audio blob size says whether anything
//! was said. Both must hold for a positive verdict.

use std::sync::Arc;

use biogate_core::traits::LipLandmarkExtractor;
use biogate_core::types::{
    LandmarkTrack, LipFrame, LipLandmarks, LipMovementSeries, LipSyncAnalysis,
};
use biogate_core::{Error, Result};

use crate::staging::StagedMedia;

/// Frames with a detected face required before a verdict is attempted.
pub const MIN_ANALYZABLE_FRAMES: usize = 10;

/// Lip-gap variance above which the mouth is considered to move.
pub const MOVEMENT_VARIANCE_THRESHOLD: f64 = 0.001;

/// Audio blobs larger than this many bytes count as containing speech.
pub const MIN_AUDIO_BYTES: usize = 1000;

/// Frame rate assumed when the extractor cannot report one.
pub const DEFAULT_FPS: f64 = 30.0;

/// Mean distance between paired upper and lower lip points.
pub fn lip_gap(lips: &LipLandmarks) -> f64 {
    let total: f64 = lips
        .upper
        .iter()
        .zip(lips.lower.iter())
        .map(|(u, l)| u.distance(l))
        .sum();
    total / lips.upper.len() as f64
}

/// Reduce a landmark track to a lip movement series.
///
/// Frames without a face are dropped, so indices may skip.
pub fn series_from_track(track: &LandmarkTrack) -> LipMovementSeries {
    let fps = if track.fps > 0.0 { track.fps } else { DEFAULT_FPS };

    let frames = track
        .frames
        .iter()
        .enumerate()
        .filter_map(|(i, frame)| {
            let lips = frame.as_ref()?;
            let frame_index = i + 1;
            Some(LipFrame {
                frame_index,
                timestamp_secs: frame_index as f64 / fps,
                lip_gap: lip_gap(lips),
            })
        })
        .collect();

    LipMovementSeries { fps, frames }
}

/// Turn a movement series into a lip-sync verdict.
pub fn analyze(series: &LipMovementSeries, audio_bytes: usize) -> Result<LipSyncAnalysis> {
    if series.len() < MIN_ANALYZABLE_FRAMES {
        return Err(Error::InsufficientVideoData {
            frames: series.len(),
            required: MIN_ANALYZABLE_FRAMES,
        });
    }

    let n = series.len() as f64;
    let mean = series.gaps().sum::<f64>() / n;
    let variance = series.gaps().map(|g| (g - mean).powi(2)).sum::<f64>() / n;

    let has_significant_movement = variance > MOVEMENT_VARIANCE_THRESHOLD;
    let has_audio = audio_bytes > MIN_AUDIO_BYTES;
    let lip_sync_detected = has_significant_movement && has_audio;

    let confidence = if lip_sync_detected {
        (0.6 + variance * 1000.0).min(0.95)
    } else {
        (variance * 500.0).max(0.1)
    };

    Ok(LipSyncAnalysis {
        frames_analyzed: series.len(),
        fps: series.fps,
        audio_bytes,
        movement_variance: variance,
        movement_mean: mean,
        has_significant_movement,
        has_audio,
        lip_sync_detected,
        confidence,
    })
}

/// Runs the whole check: stage the video, extract landmarks, analyze.
#[derive(Clone)]
pub struct LipSyncChecker {
    landmarks: Arc<dyn LipLandmarkExtractor>,
}

impl LipSyncChecker {
    pub fn new(landmarks: Arc<dyn LipLandmarkExtractor>) -> Self {
        Self { landmarks }
    }

    /// Check a decoded video against the size of its audio blob.
    ///
    /// The staged copy of the video is gone when this returns, whatever the
    /// outcome.
    pub async fn check(&self, video: &[u8], audio_bytes: usize) -> Result<LipSyncAnalysis> {
        let staged = StagedMedia::stage(video, "webm").await?;
        let track = self.landmarks.track(staged.path()).await?;
        drop(staged);

        let series = series_from_track(&track);
        tracing::debug!(
            decoded_frames = track.frames.len(),
            face_frames = series.len(),
            fps = series.fps,
            "Lip landmarks extracted"
        );

        let analysis = analyze(&series, audio_bytes)?;
        biogate_governance::track_lip_sync(&analysis);

        tracing::info!(
            detected = analysis.lip_sync_detected,
            confidence = analysis.confidence,
            variance = analysis.movement_variance,
            "Lip sync analysis complete"
        );
        Ok(analysis)
    }
}
