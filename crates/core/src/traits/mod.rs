//! Core traits for Biogate.
//!
//! Traits describe the external collaborators the service depends on:
//! - `extractors`: face encoding, voice embedding and lip landmark extraction
//! - `store`: loading the enrolled gallery

pub mod extractors;
pub mod store;

pub use extractors::*;
pub use store::*;
