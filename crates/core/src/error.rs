//! Error types for Biogate.

use thiserror::Error;

/// Result type alias using Biogate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Biogate.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("{0}")]
    InputDecode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Feature vector has {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    // =========================================================================
    // Analysis Errors
    // =========================================================================
    #[error("Insufficient video data for lip sync analysis")]
    InsufficientVideoData { frames: usize, required: usize },

    // =========================================================================
    // Collaborator Errors
    // =========================================================================
    #[error("Extractor failure: {0}")]
    Extractor(String),

    #[error("Extractor unavailable: {0}")]
    ExtractorUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    // =========================================================================
    // Service Errors
    // =========================================================================
    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Governance error: {0}")]
    Governance(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create an input decode error.
    pub fn input_decode(msg: impl Into<String>) -> Self {
        Self::InputDecode(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an extractor failure.
    pub fn extractor(msg: impl Into<String>) -> Self {
        Self::Extractor(msg.into())
    }

    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a gateway error.
    pub fn gateway(msg: impl Into<String>) -> Self {
        Self::Gateway(msg.into())
    }

    /// Create a governance error.
    pub fn governance(msg: impl Into<String>) -> Self {
        Self::Governance(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the caller sent something unusable (as opposed to a server-side failure).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InputDecode(_) | Self::InvalidRequest(_) | Self::DimensionMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_video_message() {
        let err = Error::InsufficientVideoData { frames: 3, required: 10 };
        assert_eq!(err.to_string(), "Insufficient video data for lip sync analysis");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::input_decode("Invalid image data").is_client_error());
        assert!(Error::invalid_request("missing mode").is_client_error());
        assert!(!Error::extractor("model crashed").is_client_error());
        assert!(!Error::InsufficientVideoData { frames: 0, required: 10 }.is_client_error());
    }
}
