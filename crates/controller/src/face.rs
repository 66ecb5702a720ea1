//! Face matcher.
//!
//! Dissimilarity is the Euclidean distance between 128-d encodings; the
//! displayed score is `max(0, 1 - distance) * 100`, which saturates at zero
//! for every distance of 1 or more.

use biogate_core::types::{
    ConfidenceBucket, FeatureVector, Gallery, MatchOutcome, Modality, ProfileId,
};

/// Distance below which two encodings belong to the same person.
pub const FACE_MATCH_THRESHOLD: f64 = 0.6;

/// Convert a distance into a 0..=100 score.
pub fn face_score(distance: f64) -> f64 {
    (1.0 - distance).max(0.0) * 100.0
}

/// Bucket a face score: above 70 high, above 40 medium, otherwise low.
pub fn face_confidence(score: f64) -> ConfidenceBucket {
    if score > 70.0 {
        ConfidenceBucket::High
    } else if score > 40.0 {
        ConfidenceBucket::Medium
    } else {
        ConfidenceBucket::Low
    }
}

/// Best gallery candidate for a probe encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceCandidate {
    pub profile: ProfileId,
    pub distance: f64,
}

/// Find the closest enrolled face; the first one wins on ties.
pub fn closest_face(probe: &FeatureVector, gallery: &Gallery) -> Option<FaceCandidate> {
    let mut best: Option<FaceCandidate> = None;

    for (profile, template) in gallery.templates(Modality::Face) {
        let distance = probe.euclidean_distance(template);
        if best.as_ref().map_or(true, |b| distance < b.distance) {
            best = Some(FaceCandidate {
                profile: profile.clone(),
                distance,
            });
        }
    }

    best
}

/// Identify a face against the whole gallery.
///
/// A match is reported only when the best distance is below `threshold`;
/// otherwise the outcome carries no profile but still holds the score.
pub fn identify(probe: &FeatureVector, gallery: &Gallery, threshold: f64) -> MatchOutcome {
    let Some(best) = closest_face(probe, gallery) else {
        // Nothing enrolled: infinitely far away.
        return MatchOutcome::no_match(face_score(f64::INFINITY), ConfidenceBucket::Low);
    };

    let score = face_score(best.distance);
    let confidence = face_confidence(score);

    tracing::debug!(
        candidate = %best.profile,
        distance = best.distance,
        score,
        "Face identification candidate"
    );

    if best.distance < threshold {
        MatchOutcome::matched(best.profile, score, confidence)
    } else {
        MatchOutcome::no_match(score, confidence)
    }
}

/// Verify a face against one claimed profile's template.
///
/// Always yields a record: positive for the profile, or an explicit
/// "No match" with a low bucket.
pub fn verify(probe: &FeatureVector, template: &FeatureVector, profile: &ProfileId) -> MatchOutcome {
    let distance = probe.euclidean_distance(template);
    let score = face_score(distance);

    tracing::debug!(profile = %profile, distance, score, "Face verification");

    if distance < FACE_MATCH_THRESHOLD {
        MatchOutcome::matched(profile.clone(), score, face_confidence(score))
    } else {
        MatchOutcome::no_match(score, ConfidenceBucket::Low)
    }
}
