//! Fixed-dimension feature vectors produced by the extractors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Dimensionality of a face encoding.
pub const FACE_DIMENSIONS: usize = 128;

/// Dimensionality of a voice embedding.
pub const VOICE_DIMENSIONS: usize = 256;

/// Biometric modality a vector belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Face,
    Voice,
}

impl Modality {
    /// Number of components every vector of this modality carries.
    pub fn dimensions(self) -> usize {
        match self {
            Modality::Face => FACE_DIMENSIONS,
            Modality::Voice => VOICE_DIMENSIONS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Face => "face",
            Modality::Voice => "voice",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable feature vector whose length is fixed by its modality.
///
/// Cloning is cheap: the components live behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    modality: Modality,
    values: Arc<[f32]>,
}

impl FeatureVector {
    /// Create a vector, rejecting lengths that do not match the modality.
    pub fn new(modality: Modality, values: Vec<f32>) -> Result<Self> {
        if values.len() != modality.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: modality.dimensions(),
                actual: values.len(),
            });
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::input_decode(format!(
                "{} vector contains non-finite components",
                modality
            )));
        }
        Ok(Self {
            modality,
            values: values.into(),
        })
    }

    /// Create a 128-dimensional face encoding.
    pub fn face(values: Vec<f32>) -> Result<Self> {
        Self::new(Modality::Face, values)
    }

    /// Create a 256-dimensional voice embedding.
    pub fn voice(values: Vec<f32>) -> Result<Self> {
        Self::new(Modality::Voice, values)
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Euclidean (L2) distance to another vector of the same modality.
    pub fn euclidean_distance(&self, other: &FeatureVector) -> f64 {
        debug_assert_eq!(self.modality, other.modality);
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| {
                let d = *a as f64 - *b as f64;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Cosine similarity in [-1, 1]; zero when either vector has no magnitude.
    pub fn cosine_similarity(&self, other: &FeatureVector) -> f64 {
        debug_assert_eq!(self.modality, other.modality);
        let dot: f64 = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| *a as f64 * *b as f64)
            .sum();
        let norm_a = self.norm();
        let norm_b = other.norm();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot / (norm_a * norm_b)
    }

    fn norm(&self) -> f64 {
        self.values
            .iter()
            .map(|v| *v as f64 * *v as f64)
            .sum::<f64>()
            .sqrt()
    }
}
