//! HTTP API for biogate.
//!
//! This crate provides:
//! - Axum server exposing recognition, authentication and lip-sync routes
//! - Multipart form handling
//! - Image, WAV and video payload decoding

pub mod audio;
pub mod error;
pub mod forms;
pub mod responses;
pub mod server;
pub mod video;
pub mod vision;

pub use error::ApiError;
pub use server::{AppState, GatewayServer};
