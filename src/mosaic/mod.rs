//! Mosaic planning and compositing

/// Orchestration of tiling, matching and compositing
pub mod assembler;
/// Region-to-thumbnail assignment grid
pub mod plan;
/// Thumbnail lookup by palette identifier
pub mod thumbnails;

pub use assembler::{MosaicBuilder, assemble};
pub use plan::{Assignment, MosaicPlan};
pub use thumbnails::{FileThumbnails, MemoryThumbnails, ThumbnailStore};
