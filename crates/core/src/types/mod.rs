//! Core type definitions for Biogate.
//!
//! Broken down into submodules per concern: vectors, the gallery,
//! decoded media, match outcomes, decisions and lip movement.

pub mod decision;
pub mod gallery;
pub mod lipsync;
pub mod media;
pub mod outcome;
pub mod vector;

pub use decision::*;
pub use gallery::*;
pub use lipsync::*;
pub use media::*;
pub use outcome::*;
pub use vector::*;
