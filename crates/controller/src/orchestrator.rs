//! Authentication orchestrator.
//!
//! Resolves one request per call: runs the modalities the mode asks for,
//! collects diagnostics for every soft failure and fuses the per-modality
//! results into an [`AuthDecision`].

use std::sync::Arc;

use biogate_core::traits::{FaceFeatureExtractor, VoiceFeatureExtractor};
use biogate_core::types::{
    AuthDecision, AuthMode, FaceImage, FeatureVector, Gallery, MatchOutcome, Modality,
    ModalityOutcome, ProfileId, Waveform,
};
use biogate_core::Result;

use crate::{face, voice};

/// One authentication attempt against a claimed profile.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    pub mode: AuthMode,
    pub profile: ProfileId,
    pub image: Option<FaceImage>,
    pub audio: Option<Waveform>,
}

/// Outcome of identifying every face in an image.
#[derive(Debug, Clone, PartialEq)]
pub enum FaceIdentification {
    NoFaceDetected,
    Processed {
        faces: usize,
        /// Only faces that matched an enrolled profile.
        matches: Vec<MatchOutcome>,
    },
}

/// Outcome of identifying a speaker.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceIdentificationReport {
    InputTooShort,
    Processed(voice::VoiceIdentification),
}

/// Fuses face and voice matching over a shared, read-only gallery.
#[derive(Clone)]
pub struct AuthOrchestrator {
    gallery: Arc<Gallery>,
    faces: Arc<dyn FaceFeatureExtractor>,
    voices: Arc<dyn VoiceFeatureExtractor>,
}

impl AuthOrchestrator {
    pub fn new(
        gallery: Arc<Gallery>,
        faces: Arc<dyn FaceFeatureExtractor>,
        voices: Arc<dyn VoiceFeatureExtractor>,
    ) -> Self {
        Self {
            gallery,
            faces,
            voices,
        }
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Identify every face in `image` against the gallery.
    pub async fn identify_face(&self, image: &FaceImage) -> Result<FaceIdentification> {
        let encodings = self.faces.encode(image).await?;
        if encodings.is_empty() {
            return Ok(FaceIdentification::NoFaceDetected);
        }

        let mut matches = Vec::new();
        for encoding in &encodings {
            let outcome = face::identify(encoding, &self.gallery, face::FACE_MATCH_THRESHOLD);
            biogate_governance::track_match(Modality::Face, "identify", outcome.is_match());
            if outcome.is_match() {
                matches.push(outcome);
            }
        }

        tracing::info!(faces = encodings.len(), matched = matches.len(), "Face identification");
        Ok(FaceIdentification::Processed {
            faces: encodings.len(),
            matches,
        })
    }

    /// Identify the speaker of `waveform` against the gallery.
    pub async fn identify_voice(&self, waveform: &Waveform) -> Result<VoiceIdentificationReport> {
        if !waveform.is_long_enough() {
            return Ok(VoiceIdentificationReport::InputTooShort);
        }

        let embedding = self.voices.embed(waveform).await?;
        let result = voice::identify(&embedding, &self.gallery);
        biogate_governance::track_match(Modality::Voice, "identify", result.matched.is_some());

        tracing::info!(
            matched = result.matched.is_some(),
            best_score = result.best_score(),
            "Voice identification"
        );
        Ok(VoiceIdentificationReport::Processed(result))
    }

    /// Authenticate a claimed profile under the requested mode.
    ///
    /// Never fails: every soft failure is recorded in the decision.
    pub async fn authenticate(&self, request: AuthRequest) -> AuthDecision {
        let AuthRequest {
            mode,
            profile,
            image,
            audio,
        } = request;

        let face = if mode.uses_face() {
            self.verify_face(&profile, image.as_ref()).await
        } else {
            ModalityOutcome::NotRequested
        };

        let voice = if mode.uses_voice() {
            self.verify_voice(&profile, audio.as_ref()).await
        } else {
            ModalityOutcome::NotRequested
        };

        let passed = match mode {
            AuthMode::Face => face.passed(),
            AuthMode::Voice => voice.passed(),
            AuthMode::Both => face.passed() && voice.passed(),
        };

        let mut diagnostics = Vec::new();
        if let Some(d) = face_diagnostic(mode, &profile, &face) {
            diagnostics.push(d);
        }
        if let Some(d) = voice_diagnostic(mode, &profile, &voice) {
            diagnostics.push(d);
        }

        let decision = AuthDecision {
            mode,
            profile,
            face,
            voice,
            passed,
            diagnostics,
        };

        biogate_governance::track_decision(&decision);
        tracing::info!(
            mode = %decision.mode,
            profile = %decision.profile,
            face = decision.face.kind(),
            voice = decision.voice.kind(),
            passed = decision.passed,
            "Authentication decision"
        );
        decision
    }

    async fn verify_face(&self, profile: &ProfileId, image: Option<&FaceImage>) -> ModalityOutcome {
        let Some(image) = image else {
            return ModalityOutcome::NotProvided;
        };

        let encodings = match self.faces.encode(image).await {
            Ok(encodings) => encodings,
            Err(e) => {
                tracing::error!(profile = %profile, error = %e, "Face extraction failed");
                return ModalityOutcome::ExtractorFailed(e.to_string());
            }
        };

        let Some(probe) = encodings.first() else {
            return ModalityOutcome::NoSampleDetected;
        };

        let Some(template) = self.template(profile, Modality::Face) else {
            return ModalityOutcome::ProfileNotFound;
        };

        ModalityOutcome::from_verification(face::verify(probe, template, profile))
    }

    async fn verify_voice(&self, profile: &ProfileId, audio: Option<&Waveform>) -> ModalityOutcome {
        let Some(waveform) = audio else {
            return ModalityOutcome::NotProvided;
        };

        if !waveform.is_long_enough() {
            return ModalityOutcome::InputTooShort;
        }

        // Checked before embedding so unsupported profiles never reach the model.
        let Some(template) = self.template(profile, Modality::Voice) else {
            return ModalityOutcome::ProfileNotFound;
        };

        match self.voices.embed(waveform).await {
            Ok(probe) => ModalityOutcome::from_verification(voice::verify(&probe, template, profile)),
            Err(e) => {
                tracing::error!(profile = %profile, error = %e, "Voice embedding failed");
                ModalityOutcome::ExtractorFailed(e.to_string())
            }
        }
    }

    fn template(&self, profile: &ProfileId, modality: Modality) -> Option<&FeatureVector> {
        self.gallery.get(profile.as_str())?.template(modality)
    }
}

fn face_diagnostic(mode: AuthMode, profile: &ProfileId, outcome: &ModalityOutcome) -> Option<String> {
    match outcome {
        ModalityOutcome::NotProvided if mode == AuthMode::Face => {
            Some("No image provided for face authentication.".to_string())
        }
        ModalityOutcome::NoSampleDetected => Some("No face detected in image.".to_string()),
        ModalityOutcome::ProfileNotFound => {
            Some(format!("Profile {} not found in face models.", profile))
        }
        ModalityOutcome::ExtractorFailed(e) => Some(format!("Face recognition error: {}.", e)),
        _ => None,
    }
}

fn voice_diagnostic(mode: AuthMode, profile: &ProfileId, outcome: &ModalityOutcome) -> Option<String> {
    match outcome {
        ModalityOutcome::NotProvided if mode == AuthMode::Voice => {
            Some("No audio provided for voice authentication.".to_string())
        }
        ModalityOutcome::InputTooShort => Some("Audio too short or unclear.".to_string()),
        ModalityOutcome::ProfileNotFound => {
            Some(format!("Profile {} not found in voice models.", profile))
        }
        ModalityOutcome::ExtractorFailed(e) => Some(format!("Voice recognition error: {}.", e)),
        _ => None,
    }
}
