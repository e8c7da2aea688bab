//! Run-length color histograms over image regions

use crate::color::{Color, average_color};
use crate::io::error::{MosaicError, Result};
use crate::spatial::Region;
use image::RgbaImage;
use std::collections::HashMap;

/// Count each distinct RGB color inside `region`
///
/// Alpha is ignored. Pixels of the region falling outside the image are
/// skipped. The result is sorted by color so identical inputs always yield
/// identical histograms.
pub fn region_histogram(image: &RgbaImage, region: Region) -> Vec<(u32, Color)> {
    let mut counts: HashMap<Color, u32> = HashMap::new();

    for y in region.top..region.bottom {
        for x in region.left..region.right {
            if let Some(pixel) = image.get_pixel_checked(x, y) {
                let [r, g, b, _] = pixel.0;
                *counts.entry(Color::new(r, g, b)).or_insert(0) += 1;
            }
        }
    }

    let mut histogram: Vec<(u32, Color)> = counts
        .into_iter()
        .map(|(color, count)| (count, color))
        .collect();
    histogram.sort_unstable_by_key(|&(_, color)| color);
    histogram
}

/// Average color of the pixels inside `region`
///
/// # Errors
///
/// Returns [`MosaicError::EmptyRegion`] carrying the region if it covers no pixels of the image
pub fn region_average(image: &RgbaImage, region: Region) -> Result<Color> {
    average_color(&region_histogram(image, region)).map_err(|err| match err {
        MosaicError::EmptyRegion { .. } => MosaicError::EmptyRegion {
            region: Some(region),
        },
        other => other,
    })
}
