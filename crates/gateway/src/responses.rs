//! JSON payloads returned by the API.
//!
//! Field names are part of the public contract; do not rename.

use serde::Serialize;

use biogate_core::types::{
    ConfidenceBucket, Gallery, LipSyncAnalysis, MatchOutcome, Modality,
};

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub face_models_loaded: usize,
    pub voice_models_loaded: usize,
    pub version: String,
}

impl HealthResponse {
    pub fn for_gallery(gallery: &Gallery) -> Self {
        Self {
            status: "healthy".to_string(),
            face_models_loaded: gallery.count(Modality::Face),
            voice_models_loaded: gallery.count(Modality::Voice),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SupportedModes {
    pub face: bool,
    pub voice: bool,
    pub both: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub name: String,
    pub has_face_model: bool,
    pub has_voice_model: bool,
    pub supports_modes: SupportedModes,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<ProfileSummary>,
    pub total_profiles: usize,
}

impl ProfilesResponse {
    /// Summarize `listed` profiles, or every gallery entry when `listed` is empty.
    pub fn build(gallery: &Gallery, listed: &[String]) -> Self {
        let names: Vec<String> = if listed.is_empty() {
            gallery
                .entries()
                .iter()
                .map(|e| e.profile().to_string())
                .collect()
        } else {
            listed.to_vec()
        };

        let profiles: Vec<ProfileSummary> = names
            .into_iter()
            .map(|name| {
                let entry = gallery.get(&name);
                let has_face = entry.and_then(|e| e.face()).is_some();
                let has_voice = entry.and_then(|e| e.voice()).is_some();
                ProfileSummary {
                    name,
                    has_face_model: has_face,
                    has_voice_model: has_voice,
                    supports_modes: SupportedModes {
                        face: has_face,
                        voice: has_voice,
                        both: has_face && has_voice,
                    },
                }
            })
            .collect();

        Self {
            total_profiles: profiles.len(),
            profiles,
        }
    }
}

/// One match as shown to callers; similarity is on a 0..=100 scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchPayload {
    pub name: String,
    pub similarity: f64,
    pub confidence: ConfidenceBucket,
}

impl From<&MatchOutcome> for MatchPayload {
    fn from(outcome: &MatchOutcome) -> Self {
        Self {
            name: outcome.label().to_string(),
            similarity: round_to(outcome.score, 2),
            confidence: outcome.confidence,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FaceRecognitionResponse {
    pub success: bool,
    pub message: String,
    pub matches: Vec<MatchPayload>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoiceRecognitionResponse {
    pub success: bool,
    pub message: String,
    pub matches: Vec<MatchPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_similarity: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthenticateResponse {
    pub success: bool,
    pub message: String,
    pub face_match: Option<MatchPayload>,
    pub voice_match: Option<MatchPayload>,
    pub authentication_passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LipSyncAnalysisPayload {
    pub duration_analyzed: f64,
    pub frames_processed: usize,
    pub audio_samples: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement_variance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement_mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_significant_movement: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_audio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LipSyncResponse {
    pub success: bool,
    pub lip_sync_detected: bool,
    pub confidence: f64,
    pub message: String,
    pub analysis: LipSyncAnalysisPayload,
}

impl LipSyncResponse {
    pub fn from_analysis(analysis: &LipSyncAnalysis) -> Self {
        let message = if analysis.lip_sync_detected {
            "Lip sync verified successfully!"
        } else {
            "Lip sync verification failed - insufficient lip movement detected."
        };

        Self {
            success: true,
            lip_sync_detected: analysis.lip_sync_detected,
            confidence: round_to(analysis.confidence, 3),
            message: message.to_string(),
            analysis: LipSyncAnalysisPayload {
                duration_analyzed: round_to(analysis.duration_analyzed(), 2),
                frames_processed: analysis.frames_analyzed,
                audio_samples: analysis.audio_bytes,
                movement_variance: Some(round_to(analysis.movement_variance, 6)),
                movement_mean: Some(round_to(analysis.movement_mean, 6)),
                has_significant_movement: Some(analysis.has_significant_movement),
                has_audio: Some(analysis.has_audio),
                error: None,
            },
        }
    }

    /// Structured failure body; the lip-sync route never answers with a bare error.
    pub fn failure(error: &str) -> Self {
        Self {
            success: false,
            lip_sync_detected: false,
            confidence: 0.0,
            message: format!("Error during lip sync analysis: {}", error),
            analysis: LipSyncAnalysisPayload {
                duration_analyzed: 0.0,
                frames_processed: 0,
                audio_samples: 0,
                movement_variance: None,
                movement_mean: None,
                has_significant_movement: None,
                has_audio: None,
                error: Some(error.to_string()),
            },
        }
    }
}
