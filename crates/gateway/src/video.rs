//! Video payload decoding.
//!
//! Frames are never decoded here; the container bytes go to the landmark
//! extractor untouched.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use biogate_core::{Error, Result};

use crate::vision::strip_data_url;

/// Decode a base64 video, optionally wrapped in a `data:video/...` URL.
pub fn decode_base64_video(data: &str) -> Result<Vec<u8>> {
    let payload = strip_data_url(data.trim(), "data:video");

    let bytes = STANDARD.decode(payload).map_err(|e| {
        tracing::error!(error = %e, "Error decoding base64 video");
        Error::input_decode("Invalid video data")
    })?;

    if bytes.is_empty() {
        return Err(Error::input_decode("Invalid video data"));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_prefix_is_stripped() {
        let encoded = STANDARD.encode(b"\x1a\x45\xdf\xa3webm");
        let url = format!("data:video/webm;codecs=vp8;base64,{}", encoded);
        assert_eq!(decode_base64_video(&url).unwrap(), b"\x1a\x45\xdf\xa3webm");
        assert_eq!(decode_base64_video(&encoded).unwrap(), b"\x1a\x45\xdf\xa3webm");
    }

    #[test]
    fn test_empty_or_garbage_rejected() {
        assert!(decode_base64_video("").is_err());
        assert!(decode_base64_video("data:video/webm;base64,").is_err());
        assert!(decode_base64_video("***").is_err());
    }
}
