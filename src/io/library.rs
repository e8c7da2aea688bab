//! Source image preprocessing and the on-disk palette cache
//!
//! A source set is a directory of images. Each image is cropped to a square,
//! resized to the piece size and saved as a thumbnail; the thumbnails' average
//! colors form the palette, cached as JSON under the library root:
//!
//! ```text
//! <root>/img_jsons/<set>_<w>x<h>.json
//! <root>/<set>/thumbnails/<w>x<h>/<file name>_thumbnail.png
//! ```

use crate::color::{Color, region_average};
use crate::io::configuration::{CACHE_DIR_NAME, THUMBNAIL_DIR_NAME, THUMBNAIL_SUFFIX};
use crate::io::error::{MosaicError, Result, file_system_error};
use crate::io::image::{crop_to_square, is_supported_image, load_rgba, save_png};
use crate::matching::ReferenceEntry;
use crate::spatial::Region;
use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One cached palette record
///
/// Channels are stored signed so out-of-range values in a hand-edited cache
/// are reported instead of silently wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedEntry {
    /// Path of the thumbnail
    pub thumbnail: String,
    /// Average color of the thumbnail
    pub color: [i64; 3],
}

/// Serialized palette of one source set at one piece size
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteCache {
    /// Thumbnail records in source-file order
    pub entries: Vec<CachedEntry>,
}

impl PaletteCache {
    /// Convert records into validated palette entries
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidColor`] for the first record with a channel outside `0..=255`
    pub fn into_entries(self) -> Result<Vec<ReferenceEntry>> {
        self.entries
            .into_iter()
            .map(|record| -> Result<ReferenceEntry> {
                let color = Color::from_channels(&record.thumbnail, record.color)?;
                Ok(ReferenceEntry::new(record.thumbnail, color))
            })
            .collect()
    }
}

/// Thumbnail and cache layout for one source directory
#[derive(Debug, Clone)]
pub struct SourceLibrary {
    root: PathBuf,
    source_dir: PathBuf,
    set_name: String,
    thumbnail_size: (u32, u32),
}

impl SourceLibrary {
    /// Describe the library for `source_dir` under `root`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source path is not a directory
    /// - The directory has no usable final path component
    /// - Either thumbnail dimension is zero
    pub fn new(root: &Path, source_dir: &Path, thumbnail_size: (u32, u32)) -> Result<Self> {
        if !source_dir.is_dir() {
            return Err(MosaicError::InvalidSourceData {
                reason: format!("'{}' is not a directory", source_dir.display()),
            });
        }
        let set_name = source_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| MosaicError::InvalidSourceData {
                reason: format!("'{}' has no directory name", source_dir.display()),
            })?;
        if thumbnail_size.0 == 0 || thumbnail_size.1 == 0 {
            return Err(MosaicError::InvalidDimension {
                parameter: "thumbnail_size",
                value: thumbnail_size.0.min(thumbnail_size.1),
            });
        }

        Ok(Self {
            root: root.to_path_buf(),
            source_dir: source_dir.to_path_buf(),
            set_name,
            thumbnail_size,
        })
    }

    /// Name of the source set (final component of the source directory)
    pub fn set_name(&self) -> &str {
        &self.set_name
    }

    /// Location of the JSON palette cache
    pub fn cache_path(&self) -> PathBuf {
        let (width, height) = self.thumbnail_size;
        self.root
            .join(CACHE_DIR_NAME)
            .join(format!("{}_{width}x{height}.json", self.set_name))
    }

    /// Directory receiving generated thumbnails
    pub fn thumbnail_dir(&self) -> PathBuf {
        let (width, height) = self.thumbnail_size;
        self.root
            .join(&self.set_name)
            .join(THUMBNAIL_DIR_NAME)
            .join(format!("{width}x{height}"))
    }

    /// Whether a cache and at least one thumbnail are already present
    pub fn has_cache(&self) -> bool {
        self.cache_path().is_file()
            && fs::read_dir(self.thumbnail_dir())
                .map(|mut entries| entries.next().is_some())
                .unwrap_or(false)
    }

    /// Load the cached palette, rebuilding it when absent
    ///
    /// # Errors
    ///
    /// Returns an error if the cache is corrupt, holds invalid colors, or
    /// rebuilding fails
    pub fn load_or_build(&self) -> Result<Vec<ReferenceEntry>> {
        if self.has_cache() {
            log::info!("Using cached palette '{}'", self.cache_path().display());
            return self.read_cache()?.into_entries();
        }

        log::info!(
            "No palette cache for '{}', generating thumbnails",
            self.set_name
        );
        let cache = self.build()?;
        self.write_cache(&cache)?;
        cache.into_entries()
    }

    /// Generate thumbnails for every source image and compute their colors
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory cannot be listed, holds no
    /// images, or a thumbnail cannot be produced
    pub fn build(&self) -> Result<PaletteCache> {
        let sources = self.source_images()?;
        if sources.is_empty() {
            return Err(MosaicError::InvalidSourceData {
                reason: format!("no images found in '{}'", self.source_dir.display()),
            });
        }

        let thumbnail_dir = self.thumbnail_dir();
        fs::create_dir_all(&thumbnail_dir)
            .map_err(|e| file_system_error(&thumbnail_dir, "create directory", e))?;

        let mut entries = Vec::with_capacity(sources.len());
        for source in &sources {
            let (thumbnail_path, color) = self.make_thumbnail(source, &thumbnail_dir)?;
            log::debug!("{} -> {color}", thumbnail_path.display());
            entries.push(CachedEntry {
                thumbnail: thumbnail_path.to_string_lossy().into_owned(),
                color: color.channels().map(i64::from),
            });
        }

        log::info!("Generated {} thumbnails", entries.len());
        Ok(PaletteCache { entries })
    }

    /// Read and decode the JSON cache
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid cache
    pub fn read_cache(&self) -> Result<PaletteCache> {
        let path = self.cache_path();
        let contents =
            fs::read_to_string(&path).map_err(|e| file_system_error(&path, "read cache", e))?;
        serde_json::from_str(&contents).map_err(|e| MosaicError::Cache { path, source: e })
    }

    /// Write the JSON cache, creating its directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be encoded or written
    pub fn write_cache(&self, cache: &PaletteCache) -> Result<()> {
        let path = self.cache_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| file_system_error(parent, "create directory", e))?;
        }
        let json = serde_json::to_string_pretty(cache).map_err(|e| MosaicError::Cache {
            path: path.clone(),
            source: e,
        })?;
        fs::write(&path, json).map_err(|e| file_system_error(&path, "write cache", e))
    }

    // Sorted so palette order, and therefore tie-breaking, is reproducible
    fn source_images(&self) -> Result<Vec<PathBuf>> {
        let listing = fs::read_dir(&self.source_dir)
            .map_err(|e| file_system_error(&self.source_dir, "list directory", e))?;

        let mut images = Vec::new();
        for entry in listing {
            let path = entry
                .map_err(|e| file_system_error(&self.source_dir, "list directory", e))?
                .path();
            if path.is_file() && is_supported_image(&path) {
                images.push(path);
            }
        }
        images.sort();
        Ok(images)
    }

    fn make_thumbnail(&self, source: &Path, thumbnail_dir: &Path) -> Result<(PathBuf, Color)> {
        let (width, height) = self.thumbnail_size;
        // Full file name, so `a.jpg` and `a.png` get distinct thumbnails
        let name = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let thumbnail_path = thumbnail_dir.join(format!("{name}{THUMBNAIL_SUFFIX}.png"));

        let square = crop_to_square(&load_rgba(source)?);
        let thumbnail = imageops::resize(&square, width, height, FilterType::Triangle);
        save_png(&thumbnail, &thumbnail_path)?;

        let color = region_average(&thumbnail, Region::from_origin(0, 0, width, height))?;
        Ok((thumbnail_path, color))
    }
}
