//! Spatial geometry for tiling images
//!
//! This module contains spatial-related functionality including:
//! - Pixel regions
//! - Grid tiling and trimmed canvas extents

/// Axis-aligned pixel rectangles
pub mod region;
/// Grid tiling of image bounds into equal cells
pub mod tiler;

pub use region::Region;
pub use tiler::{TileGrid, tile, trimmed_extent};
