//! Multipart form collection.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::error::ApiError;

/// Every part of a multipart body, keyed by field name.
///
/// Later parts with the same name replace earlier ones.
#[derive(Debug, Default)]
pub struct FormFields {
    fields: HashMap<String, Bytes>,
}

impl FormFields {
    /// Drain a multipart stream into memory.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut fields = HashMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::new(e.status(), e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::new(e.status(), e.body_text()))?;
            fields.insert(name, data);
        }

        Ok(Self { fields })
    }

    pub fn from_map(fields: HashMap<String, Bytes>) -> Self {
        Self { fields }
    }

    /// Text value of `name`; blank values count as absent.
    pub fn text(&self, name: &str) -> Result<Option<&str>, ApiError> {
        let Some(raw) = self.fields.get(name) else {
            return Ok(None);
        };
        let value = std::str::from_utf8(raw)
            .map_err(|_| ApiError::bad_request(format!("Form field {} is not valid UTF-8", name)))?;
        let value = value.trim();
        Ok((!value.is_empty()).then_some(value))
    }

    pub fn require_text(&self, name: &str) -> Result<&str, ApiError> {
        self.text(name)?
            .ok_or_else(|| ApiError::bad_request(format!("Missing form field: {}", name)))
    }

    /// Uploaded bytes of `name`; empty uploads count as absent.
    pub fn file(&self, name: &str) -> Option<&Bytes> {
        self.fields.get(name).filter(|b| !b.is_empty())
    }

    /// Uploaded bytes of `name`, which must be present but may be empty.
    pub fn require_file(&self, name: &str) -> Result<&Bytes, ApiError> {
        self.fields
            .get(name)
            .ok_or_else(|| ApiError::bad_request(format!("Missing form field: {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &[u8])]) -> FormFields {
        FormFields::from_map(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), Bytes::copy_from_slice(v)))
                .collect(),
        )
    }

    #[test]
    fn test_blank_text_is_absent() {
        let f = form(&[("image_data", b"  "), ("mode", b" both ")]);
        assert_eq!(f.text("image_data").unwrap(), None);
        assert_eq!(f.require_text("mode").unwrap(), "both");
        assert!(f.require_text("profile").is_err());
    }

    #[test]
    fn test_files() {
        let f = form(&[("audio_file", b""), ("audio_data", b"RIFF")]);
        assert!(f.file("audio_file").is_none());
        assert_eq!(f.require_file("audio_file").unwrap().len(), 0);
        assert_eq!(f.file("audio_data").unwrap().as_ref(), b"RIFF");
        assert!(f.require_file("video").is_err());
    }

    #[test]
    fn test_invalid_utf8_text() {
        let f = form(&[("profile", &[0xff, 0xfe])]);
        assert!(f.text("profile").is_err());
    }
}
