//! RGB color triple used as map key and distance operand

use crate::io::error::{MosaicError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An (R, G, B) triple with channels in `0..=255`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Create a color from in-range channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert untrusted channel values, rejecting anything outside `0..=255`
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidColor`] naming `identifier` if any channel is out of range
    pub fn from_channels(identifier: &str, channels: [i64; 3]) -> Result<Self> {
        let [r, g, b] = channels.map(|value| u8::try_from(value).ok());
        match (r, g, b) {
            (Some(r), Some(g), Some(b)) => Ok(Self::new(r, g, b)),
            _ => Err(MosaicError::InvalidColor {
                identifier: identifier.to_string(),
                channels,
            }),
        }
    }

    /// Channels as an array in R, G, B order
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance in RGB space
    ///
    /// Orders candidates exactly like the true distance without a square root.
    pub fn distance_squared(self, other: Self) -> u32 {
        self.channels()
            .iter()
            .zip(other.channels().iter())
            .map(|(&a, &b)| {
                let diff = u32::from(a.abs_diff(b));
                diff * diff
            })
            .sum()
    }
}

impl From<[u8; 3]> for Color {
    fn from(channels: [u8; 3]) -> Self {
        let [r, g, b] = channels;
        Self::new(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}
