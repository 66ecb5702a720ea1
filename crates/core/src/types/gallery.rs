//! The enrolled gallery: named profiles with optional per-modality templates.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::vector::{FeatureVector, Modality};
use crate::error::{Error, Result};

/// Identifier of an enrolled profile (the display name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ProfileId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// One enrolled profile.
///
/// An absent template means the profile cannot be matched for that modality.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryEntry {
    profile: ProfileId,
    face: Option<FeatureVector>,
    voice: Option<FeatureVector>,
}

impl GalleryEntry {
    /// Create an entry with no templates.
    pub fn new(profile: impl Into<ProfileId>) -> Self {
        Self {
            profile: profile.into(),
            face: None,
            voice: None,
        }
    }

    /// Attach the face template.
    pub fn with_face(mut self, template: FeatureVector) -> Result<Self> {
        expect_modality(&template, Modality::Face)?;
        self.face = Some(template);
        Ok(self)
    }

    /// Attach the voice template.
    pub fn with_voice(mut self, template: FeatureVector) -> Result<Self> {
        expect_modality(&template, Modality::Voice)?;
        self.voice = Some(template);
        Ok(self)
    }

    pub fn profile(&self) -> &ProfileId {
        &self.profile
    }

    pub fn face(&self) -> Option<&FeatureVector> {
        self.face.as_ref()
    }

    pub fn voice(&self) -> Option<&FeatureVector> {
        self.voice.as_ref()
    }

    /// Template for the given modality, if enrolled.
    pub fn template(&self, modality: Modality) -> Option<&FeatureVector> {
        match modality {
            Modality::Face => self.face(),
            Modality::Voice => self.voice(),
        }
    }
}

fn expect_modality(template: &FeatureVector, modality: Modality) -> Result<()> {
    if template.modality() != modality {
        return Err(Error::invalid_request(format!(
            "{} template supplied where a {} template was expected",
            template.modality(),
            modality
        )));
    }
    Ok(())
}

/// Read-only set of enrolled profiles.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it
/// afterwards. Iteration follows load order, which makes tie-breaking in
/// identification deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    /// Build a gallery, rejecting duplicate profile ids.
    pub fn new(entries: Vec<GalleryEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.profile.as_str()) {
                return Err(Error::storage(format!(
                    "Duplicate profile in gallery: {}",
                    entry.profile
                )));
            }
        }
        Ok(Self { entries })
    }

    /// A gallery with no enrolled profiles.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, profile: &str) -> Option<&GalleryEntry> {
        self.entries.iter().find(|e| e.profile.as_str() == profile)
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    /// Enrolled templates of one modality, in load order.
    pub fn templates(&self, modality: Modality) -> impl Iterator<Item = (&ProfileId, &FeatureVector)> {
        self.entries
            .iter()
            .filter_map(move |e| e.template(modality).map(|t| (&e.profile, t)))
    }

    /// Number of profiles with a template for the modality.
    pub fn count(&self, modality: Modality) -> usize {
        self.templates(modality).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::vector::{FACE_DIMENSIONS, VOICE_DIMENSIONS};

    fn face() -> FeatureVector {
        FeatureVector::face(vec![0.1; FACE_DIMENSIONS]).unwrap()
    }

    fn voice() -> FeatureVector {
        FeatureVector::voice(vec![0.1; VOICE_DIMENSIONS]).unwrap()
    }

    #[test]
    fn test_lookup_and_counts() {
        let gallery = Gallery::new(vec![
            GalleryEntry::new("Fenny").with_face(face()).unwrap(),
            GalleryEntry::new("George")
                .with_face(face())
                .unwrap()
                .with_voice(voice())
                .unwrap(),
            GalleryEntry::new("Jovin").with_voice(voice()).unwrap(),
        ])
        .unwrap();

        assert_eq!(gallery.len(), 3);
        assert_eq!(gallery.count(Modality::Face), 2);
        assert_eq!(gallery.count(Modality::Voice), 2);
        assert!(gallery.get("Fenny").unwrap().voice().is_none());
        assert!(gallery.get("Nobody").is_none());

        let face_order: Vec<&str> = gallery
            .templates(Modality::Face)
            .map(|(p, _)| p.as_str())
            .collect();
        assert_eq!(face_order, vec!["Fenny", "George"]);
    }

    #[test]
    fn test_duplicate_profiles_rejected() {
        let result = Gallery::new(vec![GalleryEntry::new("A"), GalleryEntry::new("A")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_modality_template_rejected() {
        assert!(GalleryEntry::new("A").with_face(voice()).is_err());
        assert!(GalleryEntry::new("A").with_voice(face()).is_err());
    }
}
