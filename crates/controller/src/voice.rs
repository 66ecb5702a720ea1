//! Voice matcher.
//!
//! Similarity is the cosine between 256-d speaker embeddings and the score
//! is `max(0, similarity) * 100`.

use biogate_core::types::{
    ConfidenceBucket, FeatureVector, Gallery, MatchOutcome, Modality, ProfileId,
};

/// Minimum cosine similarity accepted as the same speaker.
pub const VOICE_MATCH_THRESHOLD: f64 = 0.60;

/// Convert a cosine similarity into a 0..=100 score.
pub fn voice_score(similarity: f64) -> f64 {
    similarity.max(0.0) * 100.0
}

/// Bucket an accepted voice score: above 75 high, otherwise medium.
pub fn voice_confidence(score: f64) -> ConfidenceBucket {
    if score > 75.0 {
        ConfidenceBucket::High
    } else {
        ConfidenceBucket::Medium
    }
}

/// Best-scoring enrolled speaker, tracked even below the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceCandidate {
    pub profile: ProfileId,
    pub similarity: f64,
}

impl VoiceCandidate {
    pub fn score(&self) -> f64 {
        voice_score(self.similarity)
    }
}

/// Result of scanning the whole voice gallery.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceIdentification {
    /// Highest-similarity entry; `None` only when no voice is enrolled.
    pub best: Option<VoiceCandidate>,
    /// The best candidate, emitted only when it reaches the threshold.
    pub matched: Option<MatchOutcome>,
}

impl VoiceIdentification {
    /// Score of the best candidate, or zero with an empty voice gallery.
    pub fn best_score(&self) -> f64 {
        self.best.as_ref().map(VoiceCandidate::score).unwrap_or(0.0)
    }
}

/// Identify a speaker against the whole gallery.
pub fn identify(probe: &FeatureVector, gallery: &Gallery) -> VoiceIdentification {
    let mut best: Option<VoiceCandidate> = None;

    for (profile, template) in gallery.templates(Modality::Voice) {
        let similarity = probe.cosine_similarity(template);
        if best.as_ref().map_or(true, |b| similarity > b.similarity) {
            best = Some(VoiceCandidate {
                profile: profile.clone(),
                similarity,
            });
        }
    }

    let matched = best
        .as_ref()
        .filter(|b| b.similarity >= VOICE_MATCH_THRESHOLD)
        .map(|b| {
            let score = b.score();
            MatchOutcome::matched(b.profile.clone(), score, voice_confidence(score))
        });

    if let Some(ref b) = best {
        tracing::debug!(
            candidate = %b.profile,
            similarity = b.similarity,
            accepted = matched.is_some(),
            "Voice identification candidate"
        );
    }

    VoiceIdentification { best, matched }
}

/// Verify a speaker against one claimed profile's template.
///
/// Always yields a record: positive for the profile, or an explicit
/// "No match" with a low bucket.
pub fn verify(probe: &FeatureVector, template: &FeatureVector, profile: &ProfileId) -> MatchOutcome {
    let similarity = probe.cosine_similarity(template);
    let score = voice_score(similarity);

    tracing::debug!(profile = %profile, similarity, score, "Voice verification");

    if similarity >= VOICE_MATCH_THRESHOLD {
        MatchOutcome::matched(profile.clone(), score, voice_confidence(score))
    } else {
        MatchOutcome::no_match(score, ConfidenceBucket::Low)
    }
}
