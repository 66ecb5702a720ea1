//! Gallery store traits.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Gallery;

/// Source of the enrolled gallery, read once at process start.
#[async_trait]
pub trait GalleryStore: Send + Sync {
    /// Load every enrolled profile.
    async fn load(&self) -> Result<Gallery>;
}
