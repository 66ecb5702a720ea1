//! Biometric matching and fusion for biogate.
//!
//! - [`face`] and [`voice`]: per-modality identification and verification
//! - [`lipsync`]: heuristic lip-sync verdict over landmark tracks
//! - [`orchestrator`]: single-pass fusion of modalities per authentication mode

pub mod face;
pub mod lipsync;
pub mod orchestrator;
pub mod staging;
pub mod voice;

pub use face::{FaceCandidate, FACE_MATCH_THRESHOLD};
pub use lipsync::{analyze, series_from_track, LipSyncChecker};
pub use orchestrator::{AuthOrchestrator, AuthRequest, FaceIdentification, VoiceIdentificationReport};
pub use staging::StagedMedia;
pub use voice::{VoiceCandidate, VoiceIdentification, VOICE_MATCH_THRESHOLD};
