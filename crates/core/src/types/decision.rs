//! Authentication modes and the fused decision.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::gallery::ProfileId;
use super::outcome::{MatchOutcome, ModalityOutcome};
use crate::error::Error;

/// Requested authentication mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    Face,
    Voice,
    Both,
}

impl AuthMode {
    pub fn uses_face(self) -> bool {
        matches!(self, AuthMode::Face | AuthMode::Both)
    }

    pub fn uses_voice(self) -> bool {
        matches!(self, AuthMode::Voice | AuthMode::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AuthMode::Face => "face",
            AuthMode::Voice => "voice",
            AuthMode::Both => "both",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "face" => Ok(AuthMode::Face),
            "voice" => Ok(AuthMode::Voice),
            "both" => Ok(AuthMode::Both),
            other => Err(Error::invalid_request(format!(
                "Unsupported authentication mode: {}",
                other
            ))),
        }
    }
}

/// Single-pass authentication result for one claimed profile.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthDecision {
    pub mode: AuthMode,
    pub profile: ProfileId,
    pub face: ModalityOutcome,
    pub voice: ModalityOutcome,
    pub passed: bool,
    /// Human-readable reasons, face first, in the order they fired.
    pub diagnostics: Vec<String>,
}

impl AuthDecision {
    pub fn face_outcome(&self) -> Option<&MatchOutcome> {
        self.face.match_outcome()
    }

    pub fn voice_outcome(&self) -> Option<&MatchOutcome> {
        self.voice.match_outcome()
    }

    /// Summary line shown to the caller.
    pub fn message(&self) -> String {
        if self.passed {
            format!("Authentication successful for {}", self.profile)
        } else if !self.diagnostics.is_empty() {
            self.diagnostics.join(" ")
        } else {
            format!("Authentication failed for {}", self.profile)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(passed: bool, diagnostics: Vec<String>) -> AuthDecision {
        AuthDecision {
            mode: AuthMode::Both,
            profile: "George".into(),
            face: ModalityOutcome::NotProvided,
            voice: ModalityOutcome::NotProvided,
            passed,
            diagnostics,
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("face".parse::<AuthMode>().unwrap(), AuthMode::Face);
        assert_eq!("both".parse::<AuthMode>().unwrap(), AuthMode::Both);
        assert!("iris".parse::<AuthMode>().is_err());
        assert!(" both ".parse::<AuthMode>().is_err());
        assert!("FACE".parse::<AuthMode>().is_err());
        assert!(AuthMode::Both.uses_face() && AuthMode::Both.uses_voice());
        assert!(!AuthMode::Voice.uses_face());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            decision(true, vec![]).message(),
            "Authentication successful for George"
        );
        assert_eq!(
            decision(false, vec![]).message(),
            "Authentication failed for George"
        );
        assert_eq!(
            decision(
                false,
                vec![
                    "No face detected in image.".into(),
                    "Audio too short or unclear.".into()
                ]
            )
            .message(),
            "No face detected in image. Audio too short or unclear."
        );
    }
}
