//! Metrics implementation using Prometheus.

use biogate_core::types::{AuthDecision, LipSyncAnalysis, Modality, ModalityOutcome};
use biogate_core::{Error, Result};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize Prometheus recorder and return the handle.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| Error::governance(format!("Failed to install Prometheus recorder: {}", e)))?;

    tracing::info!("Prometheus metrics recorder initialized");
    Ok(handle)
}

/// Helper to track HTTP request metrics (latency, count).
pub fn track_request(method: &str, path: &str, status: u16, latency_sec: f64) {
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(latency_sec);
}

/// Count one matcher run. `operation` is "identify" or "verify".
pub fn track_match(modality: Modality, operation: &'static str, matched: bool) {
    metrics::counter!(
        "biometric_match_total",
        "modality" => modality.as_str(),
        "operation" => operation,
        "result" => if matched { "match" } else { "no_match" }
    )
    .increment(1);
}

/// Count one fused authentication decision and its per-modality outcomes.
pub fn track_decision(decision: &AuthDecision) {
    metrics::counter!(
        "authentication_decisions_total",
        "mode" => decision.mode.as_str(),
        "passed" => decision.passed.to_string()
    )
    .increment(1);

    for (modality, outcome) in [
        (Modality::Face, &decision.face),
        (Modality::Voice, &decision.voice),
    ] {
        if let ModalityOutcome::Matched(_) | ModalityOutcome::NoMatch(_) = outcome {
            track_match(modality, "verify", outcome.passed());
        }
    }
}

pub fn track_lip_sync(analysis: &LipSyncAnalysis) {
    metrics::counter!(
        "lip_sync_checks_total",
        "detected" => analysis.lip_sync_detected.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use biogate_core::types::{AuthMode, ConfidenceBucket, MatchOutcome};

    // Without an installed recorder the helpers are no-ops; they must not panic.
    #[test]
    fn test_helpers_without_recorder() {
        track_request("GET", "/api/health", 200, 0.002);
        track_match(Modality::Face, "identify", true);

        let decision = AuthDecision {
            mode: AuthMode::Both,
            profile: "Fenny".into(),
            face: ModalityOutcome::Matched(MatchOutcome::matched(
                "Fenny".into(),
                88.0,
                ConfidenceBucket::High,
            )),
            voice: ModalityOutcome::NotProvided,
            passed: false,
            diagnostics: Vec::new(),
        };
        track_decision(&decision);
    }
}
