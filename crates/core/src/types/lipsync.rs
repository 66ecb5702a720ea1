//! Lip landmark tracks and the movement series derived from them.

use serde::{Deserialize, Serialize};

/// Face-mesh indices of the upper-lip points, paired with `LOWER_LIP_INDICES`.
pub const UPPER_LIP_INDICES: [usize; 6] = [61, 84, 17, 314, 405, 320];

/// Face-mesh indices of the lower-lip points.
pub const LOWER_LIP_INDICES: [usize; 6] = [307, 375, 321, 308, 324, 318];

/// Normalized 2D landmark position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point2) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Paired upper/lower lip points of one video frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LipLandmarks {
    pub upper: [Point2; 6],
    pub lower: [Point2; 6],
}

impl LipLandmarks {
    /// Pick the lip subsets out of a full face mesh.
    ///
    /// Returns `None` when the mesh is too short to contain every lip index.
    pub fn from_mesh(mesh: &[Point2]) -> Option<Self> {
        let pick = |indices: [usize; 6]| -> Option<[Point2; 6]> {
            let mut points = [Point2::default(); 6];
            for (slot, idx) in points.iter_mut().zip(indices) {
                *slot = *mesh.get(idx)?;
            }
            Some(points)
        };

        Some(Self {
            upper: pick(UPPER_LIP_INDICES)?,
            lower: pick(LOWER_LIP_INDICES)?,
        })
    }
}

/// Per-frame landmark output for a whole video.
///
/// `frames` has one slot per decoded frame; `None` marks frames without a face.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandmarkTrack {
    pub fps: f64,
    pub frames: Vec<Option<LipLandmarks>>,
}

/// Lip gap measured on one frame that contained a face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LipFrame {
    /// 1-based index over all decoded frames.
    pub frame_index: usize,
    pub timestamp_secs: f64,
    pub lip_gap: f64,
}

/// Ordered lip gaps; frames without a detected face are absent, not zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LipMovementSeries {
    pub fps: f64,
    pub frames: Vec<LipFrame>,
}

impl LipMovementSeries {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn gaps(&self) -> impl Iterator<Item = f64> + '_ {
        self.frames.iter().map(|f| f.lip_gap)
    }
}

/// Verdict and diagnostics of a lip-sync check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LipSyncAnalysis {
    pub frames_analyzed: usize,
    pub fps: f64,
    pub audio_bytes: usize,
    pub movement_variance: f64,
    pub movement_mean: f64,
    pub has_significant_movement: bool,
    pub has_audio: bool,
    pub lip_sync_detected: bool,
    pub confidence: f64,
}

impl LipSyncAnalysis {
    /// Seconds of video covered by the analyzed frames.
    pub fn duration_analyzed(&self) -> f64 {
        if self.fps <= 0.0 {
            return 0.0;
        }
        self.frames_analyzed as f64 / self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mesh_picks_lip_indices() {
        let mesh: Vec<Point2> = (0..468).map(|i| Point2::new(i as f64, 0.0)).collect();
        let lips = LipLandmarks::from_mesh(&mesh).unwrap();
        assert_eq!(lips.upper[0].x, 61.0);
        assert_eq!(lips.upper[5].x, 320.0);
        assert_eq!(lips.lower[0].x, 307.0);
        assert_eq!(lips.lower[5].x, 318.0);
    }

    #[test]
    fn test_from_mesh_too_short() {
        let mesh = vec![Point2::default(); 100];
        assert!(LipLandmarks::from_mesh(&mesh).is_none());
    }

    #[test]
    fn test_duration_analyzed() {
        let analysis = LipSyncAnalysis {
            frames_analyzed: 45,
            fps: 30.0,
            audio_bytes: 0,
            movement_variance: 0.0,
            movement_mean: 0.0,
            has_significant_movement: false,
            has_audio: false,
            lip_sync_detected: false,
            confidence: 0.1,
        };
        assert!((analysis.duration_analyzed() - 1.5).abs() < 1e-9);
    }
}
