//! Mean color of a run-length encoded pixel histogram

use crate::color::Color;
use crate::io::error::{MosaicError, Result};

/// Average a histogram of `(count, color)` pairs into a single color
///
/// Each channel is `Σ count·value / Σ count`, rounded half-up. Identical
/// pixels are expected to arrive as one pair with their occurrence count;
/// the histogram has no cap on distinct colors, so a region of any area can
/// be passed whole.
///
/// # Errors
///
/// Returns [`MosaicError::EmptyRegion`] if the histogram holds no pixels
pub fn average_color(histogram: &[(u32, Color)]) -> Result<Color> {
    let mut totals = [0u64; 3];
    let mut pixel_count = 0u64;

    for &(count, color) in histogram {
        let weight = u64::from(count);
        pixel_count += weight;
        for (total, channel) in totals.iter_mut().zip(color.channels()) {
            *total += weight * u64::from(channel);
        }
    }

    if pixel_count == 0 {
        return Err(MosaicError::EmptyRegion { region: None });
    }

    let [r, g, b] = totals.map(|total| round_half_up(total, pixel_count));
    Ok(Color::new(r, g, b))
}

// Exact integer form of floor(total / count + 0.5)
fn round_half_up(total: u64, count: u64) -> u8 {
    let rounded = (2 * total + count) / (2 * count);
    u8::try_from(rounded).unwrap_or(u8::MAX)
}
