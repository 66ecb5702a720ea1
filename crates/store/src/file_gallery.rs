use async_trait::async_trait;
use biogate_core::{
    traits::GalleryStore,
    types::{FeatureVector, Gallery, GalleryEntry, Modality},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// On-disk gallery layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GalleryFile {
    #[serde(default)]
    pub profiles: Vec<ProfileRecord>,
}

/// One enrolled profile; either template may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<Vec<f32>>,
}

impl ProfileRecord {
    fn into_entry(self) -> Result<GalleryEntry> {
        let mut entry = GalleryEntry::new(self.name.as_str());
        if let Some(values) = self.face {
            entry = entry.with_face(template(&self.name, Modality::Face, values)?)?;
        }
        if let Some(values) = self.voice {
            entry = entry.with_voice(template(&self.name, Modality::Voice, values)?)?;
        }
        Ok(entry)
    }
}

fn template(profile: &str, modality: Modality, values: Vec<f32>) -> Result<FeatureVector> {
    FeatureVector::new(modality, values).map_err(|e| {
        Error::storage(format!(
            "Invalid {} template for profile {}: {}",
            modality, profile, e
        ))
    })
}

/// Gallery store backed by a JSON file.
pub struct JsonGalleryStore {
    path: PathBuf,
}

impl JsonGalleryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse a gallery document.
    pub fn parse(content: &str) -> Result<Gallery> {
        let file: GalleryFile = serde_json::from_str(content)
            .map_err(|e| Error::storage(format!("Failed to parse gallery file: {}", e)))?;

        let entries = file
            .profiles
            .into_iter()
            .map(ProfileRecord::into_entry)
            .collect::<Result<Vec<_>>>()?;

        Gallery::new(entries)
    }
}

#[async_trait]
impl GalleryStore for JsonGalleryStore {
    async fn load(&self) -> Result<Gallery> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            tracing::warn!(path = %self.path.display(), "Gallery file not found, starting with an empty gallery");
            return Ok(Gallery::empty());
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::storage(format!("Failed to read gallery file: {}", e)))?;

        let gallery = Self::parse(&content)?;
        tracing::info!(
            path = %self.path.display(),
            profiles = gallery.len(),
            face_templates = gallery.count(Modality::Face),
            voice_templates = gallery.count(Modality::Voice),
            "Gallery loaded"
        );
        Ok(gallery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biogate_core::types::{FACE_DIMENSIONS, VOICE_DIMENSIONS};
    use serde_json::json;

    fn document() -> serde_json::Value {
        json!({
            "profiles": [
                { "name": "Fenny", "face": vec![0.1; FACE_DIMENSIONS], "voice": vec![0.2; VOICE_DIMENSIONS] },
                { "name": "George", "face": vec![0.3; FACE_DIMENSIONS] },
                { "name": "Sim", "voice": vec![0.4; VOICE_DIMENSIONS] }
            ]
        })
    }

    #[tokio::test]
    async fn test_load_keeps_order_and_optional_templates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        std::fs::write(&path, document().to_string()).unwrap();

        let gallery = JsonGalleryStore::new(&path).load().await.unwrap();
        let names: Vec<&str> = gallery.entries().iter().map(|e| e.profile().as_str()).collect();
        assert_eq!(names, vec!["Fenny", "George", "Sim"]);
        assert_eq!(gallery.count(Modality::Face), 2);
        assert_eq!(gallery.count(Modality::Voice), 2);
        assert!(gallery.get("George").unwrap().voice().is_none());
        assert!(gallery.get("Sim").unwrap().face().is_none());
        assert_eq!(
            gallery.get("George").unwrap().face().unwrap().as_slice(),
            vec![0.3f32; FACE_DIMENSIONS].as_slice()
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_gallery() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonGalleryStore::new(dir.path().join("absent.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonGalleryStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_wrong_dimensions_rejected() {
        let doc = json!({ "profiles": [{ "name": "Short", "face": [0.1, 0.2] }] });
        let err = JsonGalleryStore::parse(&doc.to_string()).unwrap_err();
        match err {
            Error::Storage(msg) => assert!(msg.contains("Short")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_profiles_rejected() {
        let doc = json!({ "profiles": [{ "name": "A" }, { "name": "A" }] });
        assert!(JsonGalleryStore::parse(&doc.to_string()).is_err());
    }
}
