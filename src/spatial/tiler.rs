//! Division of an image into equal, non-overlapping cells
//!
//! Cells are laid out from the top-left corner. Any strip on the right or
//! bottom narrower than a piece is left out of the grid, never padded.

use crate::io::error::{MosaicError, Result};
use crate::spatial::Region;

/// Grid of `rows × columns` cells, each `piece_width × piece_height`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    piece_width: u32,
    piece_height: u32,
}

impl TileGrid {
    /// Fit as many whole pieces as possible into an image
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidDimension`] if either piece dimension is zero
    pub fn new(
        image_width: u32,
        image_height: u32,
        piece_width: u32,
        piece_height: u32,
    ) -> Result<Self> {
        if piece_width == 0 {
            return Err(MosaicError::InvalidDimension {
                parameter: "piece_width",
                value: piece_width,
            });
        }
        if piece_height == 0 {
            return Err(MosaicError::InvalidDimension {
                parameter: "piece_height",
                value: piece_height,
            });
        }

        Ok(Self {
            columns: image_width / piece_width,
            rows: image_height / piece_height,
            piece_width,
            piece_height,
        })
    }

    /// Number of cells across
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cells down
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Piece size as `(width, height)`
    pub const fn piece_size(&self) -> (u32, u32) {
        (self.piece_width, self.piece_height)
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Whether the image was too small to hold a single piece
    pub const fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Extent covered exactly by the grid as `(width, height)`
    pub const fn trimmed_extent(&self) -> (u32, u32) {
        (
            self.piece_width * self.columns,
            self.piece_height * self.rows,
        )
    }

    /// Region of the cell at `(row, col)`, if inside the grid
    pub const fn cell(&self, row: u32, col: u32) -> Option<Region> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        Some(Region::from_origin(
            col * self.piece_width,
            row * self.piece_height,
            self.piece_width,
            self.piece_height,
        ))
    }

    /// All cell regions in row-major order (top row first, left to right)
    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).filter_map(move |col| self.cell(row, col))
        })
    }
}

/// Tile an image into row-major piece regions
///
/// Produces `floor(W / pw) * floor(H / ph)` regions.
///
/// # Errors
///
/// Returns [`MosaicError::InvalidDimension`] if either piece dimension is zero
pub fn tile(
    image_width: u32,
    image_height: u32,
    piece_width: u32,
    piece_height: u32,
) -> Result<Vec<Region>> {
    let grid = TileGrid::new(image_width, image_height, piece_width, piece_height)?;
    Ok(grid.regions().collect())
}

/// Largest `(width, height)` made of whole pieces that fits in the image
///
/// # Errors
///
/// Returns [`MosaicError::InvalidDimension`] if either piece dimension is zero
pub fn trimmed_extent(
    image_width: u32,
    image_height: u32,
    piece_width: u32,
    piece_height: u32,
) -> Result<(u32, u32)> {
    TileGrid::new(image_width, image_height, piece_width, piece_height)
        .map(|grid| grid.trimmed_extent())
}
