//! Gallery persistence for biogate.
//!
//! The gallery is read once at startup; this crate only loads it.

pub mod file_gallery;

pub use file_gallery::{GalleryFile, JsonGalleryStore, ProfileRecord};
