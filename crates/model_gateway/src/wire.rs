//! JSON bodies exchanged with the inference sidecar.

use serde::{Deserialize, Serialize};

use biogate_core::{
    types::{FeatureVector, LandmarkTrack, LipLandmarks, Modality, Point2},
    Error, Result,
};

pub const FACE_ENCODE_PATH: &str = "face/encode";
pub const VOICE_EMBED_PATH: &str = "voice/embed";
pub const LIP_LANDMARKS_PATH: &str = "lips/landmarks";

#[derive(Debug, Serialize, Deserialize)]
pub struct FaceEncodeRequest {
    pub width: u32,
    pub height: u32,
    /// Base64 of the raw RGB8 pixels.
    pub rgb: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FaceEncodeResponse {
    #[serde(default)]
    pub encodings: Vec<Vec<f32>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceEmbedRequest {
    pub sample_rate: u32,
    pub samples: Vec<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceEmbedResponse {
    pub embedding: Vec<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LandmarkRequest {
    /// Base64 of the video container bytes.
    pub video: String,
}

/// Per-frame face meshes; `null` where no face was found.
#[derive(Debug, Serialize, Deserialize)]
pub struct LandmarkResponse {
    #[serde(default)]
    pub fps: f64,
    #[serde(default)]
    pub frames: Vec<Option<Vec<[f64; 2]>>>,
}

impl FaceEncodeResponse {
    pub fn into_vectors(self) -> Result<Vec<FeatureVector>> {
        self.encodings
            .into_iter()
            .map(|values| vector(Modality::Face, values))
            .collect()
    }
}

impl VoiceEmbedResponse {
    pub fn into_vector(self) -> Result<FeatureVector> {
        vector(Modality::Voice, self.embedding)
    }
}

impl LandmarkResponse {
    pub fn into_track(self) -> Result<LandmarkTrack> {
        let frames = self
            .frames
            .into_iter()
            .enumerate()
            .map(|(i, mesh)| {
                let Some(mesh) = mesh else {
                    return Ok(None);
                };
                let points: Vec<Point2> = mesh.iter().map(|[x, y]| Point2::new(*x, *y)).collect();
                LipLandmarks::from_mesh(&points).map(Some).ok_or_else(|| {
                    Error::extractor(format!(
                        "Frame {} mesh has {} points, too few for lip landmarks",
                        i + 1,
                        points.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(LandmarkTrack {
            fps: self.fps,
            frames,
        })
    }
}

// The sidecar returning the wrong shape is a backend fault, not a bad request.
fn vector(modality: Modality, values: Vec<f32>) -> Result<FeatureVector> {
    FeatureVector::new(modality, values)
        .map_err(|e| Error::extractor(format!("Sidecar returned an invalid {} vector: {}", modality, e)))
}
