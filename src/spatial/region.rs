//! Axis-aligned pixel rectangles

use std::fmt;

/// Rectangle spanning `left..right` horizontally and `top..bottom` vertically
///
/// Right and bottom edges are exclusive, so a region's width is `right - left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Region {
    /// Leftmost column (inclusive)
    pub left: u32,
    /// Topmost row (inclusive)
    pub top: u32,
    /// Column just past the right edge
    pub right: u32,
    /// Row just past the bottom edge
    pub bottom: u32,
}

impl Region {
    /// Region of the given size anchored at `(left, top)`
    pub const fn from_origin(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    /// Horizontal extent in pixels
    pub const fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Vertical extent in pixels
    pub const fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Top-left corner as `(x, y)`
    pub const fn origin(&self) -> (u32, u32) {
        (self.left, self.top)
    }

    /// Whether the two regions share at least one pixel
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Whether the region lies entirely within a `width × height` image
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right <= width && self.bottom <= height
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}
