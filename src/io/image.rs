//! Image loading and PNG export

use crate::io::configuration::SUPPORTED_EXTENSIONS;
use crate::io::error::{MosaicError, Result, file_system_error};
use image::{DynamicImage, RgbaImage};
use std::path::Path;

/// Whether the path carries one of the supported image extensions
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Decode an image file
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist
/// - The file cannot be read or is not a valid image
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    if !path.exists() {
        return Err(MosaicError::ImageNotFound {
            path: path.to_path_buf(),
        });
    }
    image::open(path).map_err(|e| MosaicError::UnreadableImage {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Decode an image file into 8-bit RGBA
///
/// # Errors
///
/// Returns the errors of [`load_image`]
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    load_image(path).map(|img| img.to_rgba8())
}

/// Crop to a square anchored at the top-left corner
///
/// The longer side is trimmed to the length of the shorter one.
pub fn crop_to_square(image: &RgbaImage) -> RgbaImage {
    let side = image.width().min(image.height());
    image::imageops::crop_imm(image, 0, 0, side, side).to_image()
}

/// Save an image as PNG, creating missing parent directories
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| file_system_error(parent, "create directory", e))?;
        }
    }

    image
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
