//! Match outcomes produced by the face and voice matchers.

use serde::{Deserialize, Serialize};

use super::gallery::ProfileId;

/// Label used for explicit negative verification outcomes.
pub const NO_MATCH_LABEL: &str = "No match";

/// Coarse qualitative confidence derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBucket {
    High,
    Medium,
    Low,
}

impl ConfidenceBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceBucket::High => "high",
            ConfidenceBucket::Medium => "medium",
            ConfidenceBucket::Low => "low",
        }
    }
}

/// Result of comparing one sample against the gallery or one template.
///
/// `matched_profile` is set only when the acceptance threshold was met;
/// the score is always filled in so it can be shown for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub matched_profile: Option<ProfileId>,
    /// Score on a 0..=100 scale.
    pub score: f64,
    pub confidence: ConfidenceBucket,
}

impl MatchOutcome {
    pub fn matched(profile: ProfileId, score: f64, confidence: ConfidenceBucket) -> Self {
        Self {
            matched_profile: Some(profile),
            score,
            confidence,
        }
    }

    pub fn no_match(score: f64, confidence: ConfidenceBucket) -> Self {
        Self {
            matched_profile: None,
            score,
            confidence,
        }
    }

    pub fn is_match(&self) -> bool {
        self.matched_profile.is_some()
    }

    /// Display name: the matched profile or "No match".
    pub fn label(&self) -> &str {
        self.matched_profile
            .as_ref()
            .map(ProfileId::as_str)
            .unwrap_or(NO_MATCH_LABEL)
    }
}

/// How one modality fared during an authentication request.
///
/// Every soft failure is a variant so that callers handle each case
/// explicitly instead of catching errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalityOutcome {
    /// The mode does not use this modality.
    NotRequested,
    /// The mode uses it but no input was supplied.
    NotProvided,
    /// No face was found in the image.
    NoSampleDetected,
    /// The audio was shorter than one second.
    InputTooShort,
    /// The claimed profile has no template for this modality.
    ProfileNotFound,
    /// The extractor failed unexpectedly.
    ExtractorFailed(String),
    Matched(MatchOutcome),
    NoMatch(MatchOutcome),
}

impl ModalityOutcome {
    /// Wrap a verification result in the matching variant.
    pub fn from_verification(outcome: MatchOutcome) -> Self {
        if outcome.is_match() {
            ModalityOutcome::Matched(outcome)
        } else {
            ModalityOutcome::NoMatch(outcome)
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, ModalityOutcome::Matched(_))
    }

    /// The comparison record, present whenever a comparison actually ran.
    pub fn match_outcome(&self) -> Option<&MatchOutcome> {
        match self {
            ModalityOutcome::Matched(outcome) | ModalityOutcome::NoMatch(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Short tag used for logs and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            ModalityOutcome::NotRequested => "not_requested",
            ModalityOutcome::NotProvided => "not_provided",
            ModalityOutcome::NoSampleDetected => "no_sample",
            ModalityOutcome::InputTooShort => "too_short",
            ModalityOutcome::ProfileNotFound => "profile_not_found",
            ModalityOutcome::ExtractorFailed(_) => "extractor_failed",
            ModalityOutcome::Matched(_) => "matched",
            ModalityOutcome::NoMatch(_) => "no_match",
        }
    }
}
