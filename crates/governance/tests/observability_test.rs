use biogate_core::config::GovernanceConfig;
use biogate_core::types::{
    AuthDecision, AuthMode, ConfidenceBucket, LipSyncAnalysis, MatchOutcome, Modality,
    ModalityOutcome,
};
use biogate_governance::{
    configure_tracing, setup_metrics_recorder, track_decision, track_lip_sync, track_match,
    track_request,
};

#[test]
fn test_recorded_metrics_are_rendered() {
    let handle = setup_metrics_recorder().unwrap();

    track_request("POST", "/api/authenticate", 200, 0.12);
    track_match(Modality::Voice, "identify", false);
    track_decision(&AuthDecision {
        mode: AuthMode::Face,
        profile: "George".into(),
        face: ModalityOutcome::NoMatch(MatchOutcome::no_match(12.0, ConfidenceBucket::Low)),
        voice: ModalityOutcome::NotProvided,
        passed: false,
        diagnostics: Vec::new(),
    });
    track_lip_sync(&LipSyncAnalysis {
        frames_analyzed: 30,
        fps: 30.0,
        audio_bytes: 2_000,
        movement_variance: 0.002,
        movement_mean: 0.1,
        has_significant_movement: true,
        has_audio: true,
        lip_sync_detected: true,
        confidence: 0.95,
    });

    let rendered = handle.render();
    assert!(rendered.contains("http_requests_total"));
    assert!(rendered.contains("path=\"/api/authenticate\""));
    assert!(rendered.contains("biometric_match_total"));
    assert!(rendered.contains("operation=\"verify\""));
    assert!(rendered.contains("authentication_decisions_total"));
    assert!(rendered.contains("lip_sync_checks_total"));

    // Only one global recorder per process.
    assert!(setup_metrics_recorder().is_err());
}

#[test]
fn test_tracing_installs_once() {
    let config = GovernanceConfig {
        json_logs: true,
        enable_metrics: false,
    };
    assert!(configure_tracing(&config).is_ok());
    assert!(configure_tracing(&config).is_err());
}
