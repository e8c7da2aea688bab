//! Matching region colors against the reference palette

/// Palette entries
pub mod entry;
/// Bucketed index and exhaustive nearest-color search
pub mod index;
/// Quantization of colors into bucket keys
pub mod quantize;

pub use entry::ReferenceEntry;
pub use index::{ColorIndex, MatchSource, Resolution, exhaustive_match};
