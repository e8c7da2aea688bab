//! Palette entries pairing a thumbnail with its average color

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// A candidate thumbnail and its precomputed average color
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Handle of the thumbnail, resolved by a [`crate::mosaic::ThumbnailStore`]
    pub identifier: String,
    /// Average color of the thumbnail
    pub color: Color,
}

impl ReferenceEntry {
    /// Pair an identifier with its color
    pub fn new(identifier: impl Into<String>, color: Color) -> Self {
        Self {
            identifier: identifier.into(),
            color,
        }
    }
}
