//! Core types, traits, and error definitions for Biogate.
//!
//! This crate provides the building blocks shared by every layer of the
//! biometric authentication service: feature vectors, the enrolled gallery,
//! match outcomes, and the contracts of the external extractors.

pub mod config;
pub mod error;
pub mod mocks;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::*;
pub use types::*;
