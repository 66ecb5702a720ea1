//! Scoped staging of uploaded media on disk.

use std::path::Path;

use biogate_core::{Error, Result};
use tempfile::NamedTempFile;

/// Uploaded media written to a named temporary file.
///
/// The file lives exactly as long as this guard; dropping it removes the
/// file on every exit path, including early returns and errors.
#[derive(Debug)]
pub struct StagedMedia {
    file: NamedTempFile,
}

impl StagedMedia {
    /// Write `bytes` to a fresh temporary file with the given extension.
    pub async fn stage(bytes: &[u8], extension: &str) -> Result<Self> {
        let suffix = format!(".{}", extension);
        let file = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix("biogate-")
                .suffix(&suffix)
                .tempfile()
        })
        .await
        .map_err(|e| Error::internal(format!("Staging task failed: {}", e)))?
        .map_err(|e| Error::internal(format!("Failed to create staging file: {}", e)))?;

        tokio::fs::write(file.path(), bytes)
            .await
            .map_err(|e| Error::internal(format!("Failed to stage media: {}", e)))?;

        tracing::debug!(path = %file.path().display(), bytes = bytes.len(), "Media staged");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_staged_file_removed_on_drop() {
        let staged = StagedMedia::stage(b"not really a video", "webm").await.unwrap();
        let path = staged.path().to_path_buf();

        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("webm"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"not really a video");

        drop(staged);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_concurrent_staging_uses_distinct_files() {
        let (a, b) = tokio::join!(
            StagedMedia::stage(b"first", "webm"),
            StagedMedia::stage(b"second", "webm")
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a.path(), b.path());
        assert_eq!(tokio::fs::read(a.path()).await.unwrap(), b"first");
        assert_eq!(tokio::fs::read(b.path()).await.unwrap(), b"second");
    }
}
