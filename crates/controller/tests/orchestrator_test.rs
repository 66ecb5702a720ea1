//! Authentication orchestrator tests.
//!
//! Exercises fusion per mode and the diagnostics produced for every soft
//! failure, using mock extractors in place of the inference models.

use std::sync::Arc;

use biogate_controller::{AuthOrchestrator, AuthRequest, FaceIdentification, VoiceIdentificationReport};
use biogate_core::mocks::{FailingExtractor, MockFaceExtractor, MockVoiceExtractor};
use biogate_core::types::{
    AuthMode, ConfidenceBucket, FaceImage, FeatureVector, Gallery, GalleryEntry, ModalityOutcome,
    ProfileId, Waveform, FACE_DIMENSIONS, TARGET_SAMPLE_RATE, VOICE_DIMENSIONS,
};

fn face(prefix: &[f32]) -> FeatureVector {
    let mut values = vec![0.0; FACE_DIMENSIONS];
    values[..prefix.len()].copy_from_slice(prefix);
    FeatureVector::face(values).unwrap()
}

/// Voice embedding at the given cosine to the enrolled template.
fn voice_at(cos: f32) -> FeatureVector {
    let mut values = vec![0.0; VOICE_DIMENSIONS];
    values[0] = cos;
    values[1] = (1.0 - cos * cos).sqrt();
    FeatureVector::voice(values).unwrap()
}

fn gallery() -> Arc<Gallery> {
    Arc::new(
        Gallery::new(vec![
            GalleryEntry::new("A")
                .with_face(face(&[]))
                .unwrap()
                .with_voice(voice_at(1.0))
                .unwrap(),
            GalleryEntry::new("FaceOnly").with_face(face(&[0.9])).unwrap(),
        ])
        .unwrap(),
    )
}

fn image() -> FaceImage {
    FaceImage::new(2, 2, vec![128; 12])
}

fn audio(seconds: f32) -> Waveform {
    let n = (seconds * TARGET_SAMPLE_RATE as f32) as usize;
    Waveform::new(vec![0.1; n], TARGET_SAMPLE_RATE)
}

fn orchestrator(face_probe: Option<FeatureVector>, voice_probe: FeatureVector) -> AuthOrchestrator {
    let faces = match face_probe {
        Some(v) => MockFaceExtractor::single(v),
        None => MockFaceExtractor::no_face(),
    };
    AuthOrchestrator::new(
        gallery(),
        Arc::new(faces),
        Arc::new(MockVoiceExtractor::new(voice_probe)),
    )
}

fn request(mode: AuthMode, profile: &str, image: Option<FaceImage>, audio: Option<Waveform>) -> AuthRequest {
    AuthRequest {
        mode,
        profile: ProfileId::new(profile),
        image,
        audio,
    }
}

#[tokio::test]
async fn test_both_mode_missing_audio_is_silent() {
    let orch = orchestrator(Some(face(&[0.1])), voice_at(1.0));
    let decision = orch
        .authenticate(request(AuthMode::Both, "A", Some(image()), None))
        .await;

    assert!(decision.face.passed());
    assert_eq!(decision.voice, ModalityOutcome::NotProvided);
    assert!(!decision.passed);
    assert!(decision.diagnostics.is_empty());
    assert_eq!(decision.message(), "Authentication failed for A");
}

#[tokio::test]
async fn test_both_mode_passes_when_both_match() {
    let orch = orchestrator(Some(face(&[0.3])), voice_at(0.8));
    let decision = orch
        .authenticate(request(AuthMode::Both, "A", Some(image()), Some(audio(1.5))))
        .await;

    assert!(decision.passed);
    assert_eq!(decision.message(), "Authentication successful for A");

    let face_match = decision.face_outcome().unwrap();
    assert_eq!(face_match.label(), "A");
    assert_eq!(face_match.confidence, ConfidenceBucket::Medium);

    let voice_match = decision.voice_outcome().unwrap();
    assert_eq!(voice_match.label(), "A");
    assert_eq!(voice_match.confidence, ConfidenceBucket::High);
}

#[tokio::test]
async fn test_both_mode_requires_each_threshold() {
    // Face distance 0.6 is not below the threshold.
    let orch = orchestrator(Some(face(&[0.6])), voice_at(0.9));
    let decision = orch
        .authenticate(request(AuthMode::Both, "A", Some(image()), Some(audio(2.0))))
        .await;
    assert!(!decision.passed);
    assert_eq!(decision.face_outcome().unwrap().label(), "No match");
    assert!(decision.voice.passed());

    // Voice similarity just below 0.60.
    let orch = orchestrator(Some(face(&[0.1])), voice_at(0.59));
    let decision = orch
        .authenticate(request(AuthMode::Both, "A", Some(image()), Some(audio(2.0))))
        .await;
    assert!(!decision.passed);
    assert!(decision.face.passed());
    let voice_match = decision.voice_outcome().unwrap();
    assert_eq!(voice_match.label(), "No match");
    assert_eq!(voice_match.confidence, ConfidenceBucket::Low);
}

#[tokio::test]
async fn test_face_mode_no_face_detected() {
    let orch = orchestrator(None, voice_at(1.0));
    let decision = orch
        .authenticate(request(AuthMode::Face, "A", Some(image()), None))
        .await;

    assert_eq!(decision.face, ModalityOutcome::NoSampleDetected);
    assert_eq!(decision.voice, ModalityOutcome::NotRequested);
    assert!(!decision.passed);
    assert_eq!(decision.message(), "No face detected in image.");
}

#[tokio::test]
async fn test_single_modality_missing_input_is_reported() {
    let orch = orchestrator(Some(face(&[])), voice_at(1.0));

    let decision = orch.authenticate(request(AuthMode::Face, "A", None, None)).await;
    assert_eq!(decision.message(), "No image provided for face authentication.");

    let decision = orch.authenticate(request(AuthMode::Voice, "A", None, None)).await;
    assert_eq!(decision.message(), "No audio provided for voice authentication.");
}

#[tokio::test]
async fn test_profile_missing_voice_template() {
    let voices = Arc::new(MockVoiceExtractor::new(voice_at(1.0)));
    let orch = AuthOrchestrator::new(
        gallery(),
        Arc::new(MockFaceExtractor::single(face(&[0.9]))),
        voices.clone(),
    );

    let decision = orch
        .authenticate(request(AuthMode::Both, "FaceOnly", Some(image()), Some(audio(1.0))))
        .await;

    assert!(decision.face.passed());
    assert_eq!(decision.voice, ModalityOutcome::ProfileNotFound);
    assert!(!decision.passed);
    assert_eq!(decision.message(), "Profile FaceOnly not found in voice models.");
    // Unsupported profiles never reach the embedding model.
    assert_eq!(voices.call_count(), 0);
}

#[tokio::test]
async fn test_unknown_profile_reports_both_modalities_in_order() {
    let orch = orchestrator(Some(face(&[])), voice_at(1.0));
    let decision = orch
        .authenticate(request(AuthMode::Both, "Nobody", Some(image()), Some(audio(1.0))))
        .await;

    assert_eq!(
        decision.diagnostics,
        vec![
            "Profile Nobody not found in face models.".to_string(),
            "Profile Nobody not found in voice models.".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_short_audio_skips_embedding() {
    let voices = Arc::new(MockVoiceExtractor::new(voice_at(1.0)));
    let orch = AuthOrchestrator::new(gallery(), Arc::new(MockFaceExtractor::no_face()), voices.clone());

    let decision = orch
        .authenticate(request(AuthMode::Voice, "A", None, Some(audio(0.5))))
        .await;

    assert_eq!(decision.voice, ModalityOutcome::InputTooShort);
    assert_eq!(decision.message(), "Audio too short or unclear.");
    assert_eq!(voices.call_count(), 0);
}

#[tokio::test]
async fn test_extractor_failures_become_diagnostics() {
    let failing = Arc::new(FailingExtractor::new("model offline"));
    let orch = AuthOrchestrator::new(gallery(), failing.clone(), failing);

    let decision = orch
        .authenticate(request(AuthMode::Both, "A", Some(image()), Some(audio(1.0))))
        .await;

    assert!(matches!(decision.face, ModalityOutcome::ExtractorFailed(_)));
    assert!(matches!(decision.voice, ModalityOutcome::ExtractorFailed(_)));
    assert_eq!(
        decision.message(),
        "Face recognition error: Extractor failure: model offline. \
         Voice recognition error: Extractor failure: model offline."
    );
}

#[tokio::test]
async fn test_identify_face_reports_only_matches() {
    let faces = MockFaceExtractor::new(vec![face(&[0.05]), face(&[5.0])]);
    let orch = AuthOrchestrator::new(
        gallery(),
        Arc::new(faces),
        Arc::new(MockVoiceExtractor::new(voice_at(1.0))),
    );

    match orch.identify_face(&image()).await.unwrap() {
        FaceIdentification::Processed { faces, matches } => {
            assert_eq!(faces, 2);
            assert_eq!(matches.len(), 1);
            assert_eq!(matches[0].label(), "A");
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let orch = orchestrator(None, voice_at(1.0));
    assert_eq!(
        orch.identify_face(&image()).await.unwrap(),
        FaceIdentification::NoFaceDetected
    );
}

#[tokio::test]
async fn test_identify_voice_below_threshold() {
    let orch = orchestrator(None, voice_at(0.5));

    match orch.identify_voice(&audio(1.0)).await.unwrap() {
        VoiceIdentificationReport::Processed(result) => {
            assert!(result.matched.is_none());
            assert_eq!(result.best.unwrap().profile.as_str(), "A");
        }
        other => panic!("unexpected result: {:?}", other),
    }

    assert_eq!(
        orch.identify_voice(&audio(0.25)).await.unwrap(),
        VoiceIdentificationReport::InputTooShort
    );
}
