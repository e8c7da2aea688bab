//! Rounding colors to bucket keys

use crate::color::Color;
use crate::io::error::{Result, invalid_parameter};

/// Quantized color used as a bucket key
///
/// Channels may exceed 255 because values round up to the next multiple.
pub type BucketKey = [u16; 3];

/// Round a channel to the nearest multiple of `quantum`
///
/// A remainder of exactly half the quantum rounds up.
pub const fn quantize_channel(value: u16, quantum: u16) -> u16 {
    let remainder = value % quantum;
    let floor = value - remainder;
    if 2 * remainder < quantum {
        floor
    } else {
        floor + quantum
    }
}

/// Bucket key of a color
pub fn quantize(color: Color, quantum: u16) -> BucketKey {
    color
        .channels()
        .map(|channel| quantize_channel(u16::from(channel), quantum))
}

/// Check that a quantum can be used as a bucket width
///
/// # Errors
///
/// Returns an invalid parameter error if the quantum is zero or wider than a channel
pub fn validate_quantum(quantum: u16) -> Result<u16> {
    if quantum == 0 || quantum > 255 {
        return Err(invalid_parameter(
            "quantum",
            &quantum,
            &"must be between 1 and 255",
        ));
    }
    Ok(quantum)
}
