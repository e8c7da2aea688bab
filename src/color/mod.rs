//! Color representation and region color statistics

/// Mean color of a pixel histogram
pub mod average;
/// Region histogram extraction from RGBA images
pub mod histogram;
/// RGB color triple
pub mod rgb;

pub use average::average_color;
pub use histogram::{region_average, region_histogram};
pub use rgb::Color;
