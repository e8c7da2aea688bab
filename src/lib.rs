//! Photomosaic construction by average-color matching
//!
//! An input image is cut into equal cells, each cell's average color is
//! matched against a palette of thumbnails through a quantized color index,
//! and the best thumbnails are pasted over a trimmed copy of the input.

#![forbid(unsafe_code)]

/// Color representation, histograms and averaging
pub mod color;
/// Input/output operations, configuration and error handling
pub mod io;
/// Palette entries, quantization and the nearest-color index
pub mod matching;
/// Mosaic planning, thumbnail lookup and compositing
pub mod mosaic;
/// Region geometry and grid tiling
pub mod spatial;

pub use io::error::{MosaicError, Result};
