//! Resolution of palette identifiers to thumbnail images

use crate::io::error::{MosaicError, Result};
use crate::io::image::load_rgba;
use image::{ImageReader, RgbaImage};
use std::collections::HashMap;
use std::path::Path;

/// Source of thumbnail images addressed by palette identifier
pub trait ThumbnailStore {
    /// Whether `identifier` names a thumbnail this store can load
    fn contains(&self, identifier: &str) -> bool;

    /// Load the thumbnail named by `identifier`
    ///
    /// # Errors
    ///
    /// Returns an error if the thumbnail is missing or cannot be decoded
    fn load(&self, identifier: &str) -> Result<RgbaImage>;
}

/// Thumbnails on disk, with identifiers interpreted as file paths
///
/// A file counts as present only when its image header can be decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileThumbnails;

impl ThumbnailStore for FileThumbnails {
    fn contains(&self, identifier: &str) -> bool {
        Path::new(identifier).is_file()
            && ImageReader::open(identifier)
                .and_then(ImageReader::with_guessed_format)
                .is_ok_and(|reader| reader.into_dimensions().is_ok())
    }

    fn load(&self, identifier: &str) -> Result<RgbaImage> {
        load_rgba(Path::new(identifier))
    }
}

/// Thumbnails held in memory, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct MemoryThumbnails {
    images: HashMap<String, RgbaImage>,
}

impl MemoryThumbnails {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a thumbnail, replacing any previous image under the same identifier
    pub fn insert(&mut self, identifier: impl Into<String>, image: RgbaImage) {
        self.images.insert(identifier.into(), image);
    }

    /// Builder-style [`MemoryThumbnails::insert`]
    #[must_use]
    pub fn with(mut self, identifier: impl Into<String>, image: RgbaImage) -> Self {
        self.insert(identifier, image);
        self
    }

    /// Number of stored thumbnails
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the store holds no thumbnails
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ThumbnailStore for MemoryThumbnails {
    fn contains(&self, identifier: &str) -> bool {
        self.images.contains_key(identifier)
    }

    fn load(&self, identifier: &str) -> Result<RgbaImage> {
        self.images
            .get(identifier)
            .cloned()
            .ok_or_else(|| MosaicError::MissingReferenceResource {
                identifier: identifier.to_string(),
            })
    }
}
