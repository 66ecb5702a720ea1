//! Image payload decoding.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use biogate_core::{types::FaceImage, Error, Result};

/// Decode a base64 image, optionally wrapped in a `data:image/...` URL.
///
/// Any supported container is accepted and converted to RGB8.
pub fn decode_base64_image(data: &str) -> Result<FaceImage> {
    let payload = strip_data_url(data.trim(), "data:image");

    let bytes = STANDARD.decode(payload).map_err(|e| {
        tracing::error!(error = %e, "Error decoding base64 image");
        Error::input_decode("Invalid image data")
    })?;

    let img = image::load_from_memory(&bytes).map_err(|e| {
        tracing::error!(error = %e, size = bytes.len(), "Error decoding image");
        Error::input_decode("Invalid image data")
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    tracing::debug!(width, height, "Image decoded");

    Ok(FaceImage::new(width, height, rgb.into_raw()))
}

/// Drop a `data:<kind>...;base64,` prefix when present.
pub(crate) fn strip_data_url<'a>(data: &'a str, kind: &str) -> &'a str {
    if data.starts_with(kind) {
        data.split(',').nth(1).unwrap_or("")
    } else {
        data
    }
}
