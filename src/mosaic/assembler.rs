//! Mosaic assembly: index the palette, match every cell, then paste thumbnails
//!
//! Matching is pure and runs in parallel across cells. Compositing writes to
//! a single canvas and always runs sequentially in plan order.

use crate::color::region_average;
use crate::io::configuration::DEFAULT_QUANTUM;
use crate::io::error::{MosaicError, Result, WithContext, invalid_parameter};
use crate::matching::{ColorIndex, MatchSource, ReferenceEntry, Resolution};
use crate::mosaic::ThumbnailStore;
use crate::mosaic::plan::{Assignment, MosaicPlan};
use crate::spatial::{Region, TileGrid};
use image::{RgbaImage, imageops};
use rayon::prelude::*;
use std::collections::HashMap;

/// Builds a mosaic from one owned input image
///
/// The tiling grid is fixed when the builder is created; the palette index
/// can be built per call or shared across builders.
pub struct MosaicBuilder<S> {
    image: RgbaImage,
    grid: TileGrid,
    quantum: u16,
    store: S,
}

struct Thumbnail {
    image: RgbaImage,
    opaque: bool,
}

impl<S: ThumbnailStore> MosaicBuilder<S> {
    /// Prepare to tile `image` into `piece_width × piece_height` cells
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidDimension`] if either piece dimension is zero
    pub fn new(image: RgbaImage, piece_width: u32, piece_height: u32, store: S) -> Result<Self> {
        let grid = TileGrid::new(image.width(), image.height(), piece_width, piece_height)?;
        Ok(Self {
            image,
            grid,
            quantum: DEFAULT_QUANTUM,
            store,
        })
    }

    /// Use a different bucket width when indexing palettes
    #[must_use]
    pub fn with_quantum(mut self, quantum: u16) -> Self {
        self.quantum = quantum;
        self
    }

    /// Tiling grid of the input image
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Thumbnail store used to verify and load palette entries
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Copy of the input cropped to the grid's trimmed extent
    ///
    /// Excess columns on the right and rows at the bottom are discarded.
    pub fn canvas(&self) -> RgbaImage {
        let (width, height) = self.grid.trimmed_extent();
        imageops::crop_imm(&self.image, 0, 0, width, height).to_image()
    }

    /// Build a verified index over `palette`
    ///
    /// # Errors
    ///
    /// Returns an error if the palette is empty, contains conflicting
    /// duplicates, or names thumbnails the store cannot resolve
    pub fn index(&self, palette: Vec<ReferenceEntry>) -> Result<ColorIndex> {
        if palette.is_empty() {
            return Err(MosaicError::EmptyPalette);
        }
        ColorIndex::build_verified(palette, self.quantum, &self.store)
    }

    /// Match every cell of the grid against the index
    ///
    /// # Errors
    ///
    /// Returns an error if a cell cannot be averaged or the index is empty
    pub fn plan(&self, index: &ColorIndex) -> Result<MosaicPlan> {
        if index.is_empty() {
            return Err(MosaicError::EmptyPalette);
        }

        let image = &self.image;
        let regions: Vec<Region> = self.grid.regions().collect();
        let assignments = regions
            .par_iter()
            .map(|&region| -> Result<Assignment> {
                let color = region_average(image, region)?;
                let Resolution { entry, source } = index.resolve(color)?;
                Ok(Assignment {
                    region,
                    color,
                    entry,
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let plan = MosaicPlan::new(self.grid, assignments)?;
        log::info!(
            "Matched {} cells: {} bucket hits, {} exhaustive fallbacks",
            plan.len(),
            plan.count_by_source(MatchSource::Bucket),
            plan.count_by_source(MatchSource::Exhaustive)
        );
        Ok(plan)
    }

    /// Paste the planned thumbnails onto a trimmed canvas
    ///
    /// Every referenced thumbnail is loaded and size-checked before the first
    /// paste. `on_paste` receives the running count of pasted cells.
    ///
    /// # Errors
    ///
    /// Returns an error if a thumbnail cannot be loaded or its size differs
    /// from the piece size
    pub fn compose<F>(
        &self,
        plan: &MosaicPlan,
        index: &ColorIndex,
        mut on_paste: F,
    ) -> Result<RgbaImage>
    where
        F: FnMut(usize),
    {
        let thumbnails = self.load_thumbnails(plan, index)?;
        let mut canvas = self.canvas();

        for (pasted, assignment) in plan.assignments().enumerate() {
            let thumbnail = thumbnails.get(&assignment.entry).ok_or_else(|| {
                invalid_parameter("entry", &assignment.entry, &"not loaded before compositing")
            })?;
            let (x, y) = assignment.region.origin();
            if thumbnail.opaque {
                imageops::replace(&mut canvas, &thumbnail.image, i64::from(x), i64::from(y));
            } else {
                imageops::overlay(&mut canvas, &thumbnail.image, i64::from(x), i64::from(y));
            }
            on_paste(pasted + 1);
        }

        Ok(canvas)
    }

    /// Plan and compose against an already built index
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::MosaicBuild`] wrapping the first failure
    pub fn assemble_with_index<F>(&self, index: &ColorIndex, on_paste: F) -> Result<RgbaImage>
    where
        F: FnMut(usize),
    {
        let plan = self.plan(index).in_stage("matching")?;
        self.compose(&plan, index, on_paste).in_stage("compositing")
    }

    /// Index `palette`, match every cell and composite the result
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::MosaicBuild`] wrapping the first failure; no
    /// partial mosaic is produced
    pub fn assemble(&self, palette: Vec<ReferenceEntry>) -> Result<RgbaImage> {
        let index = self.index(palette).in_stage("indexing")?;
        self.assemble_with_index(&index, |_| {})
    }

    fn load_thumbnails(
        &self,
        plan: &MosaicPlan,
        index: &ColorIndex,
    ) -> Result<HashMap<usize, Thumbnail>> {
        let expected = self.grid.piece_size();
        let mut thumbnails = HashMap::new();

        for position in plan.distinct_entries() {
            let entry = index.entry(position).ok_or_else(|| {
                invalid_parameter("entry", &position, &"outside the palette index")
            })?;
            let image = self.store.load(&entry.identifier)?;
            let actual = image.dimensions();
            if actual != expected {
                return Err(MosaicError::ThumbnailSizeMismatch {
                    identifier: entry.identifier.clone(),
                    expected,
                    actual,
                });
            }
            let opaque = image.pixels().all(|pixel| pixel.0[3] == u8::MAX);
            thumbnails.insert(position, Thumbnail { image, opaque });
        }

        log::debug!("Loaded {} distinct thumbnails", thumbnails.len());
        Ok(thumbnails)
    }
}

/// Build a mosaic of `image` from `palette` in one call
///
/// # Errors
///
/// Returns [`MosaicError::MosaicBuild`] wrapping the first failure
pub fn assemble<S: ThumbnailStore>(
    image: RgbaImage,
    piece_width: u32,
    piece_height: u32,
    palette: Vec<ReferenceEntry>,
    store: S,
) -> Result<RgbaImage> {
    MosaicBuilder::new(image, piece_width, piece_height, store)
        .in_stage("tiling")?
        .assemble(palette)
}
