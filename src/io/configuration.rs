//! Mosaic constants and runtime configuration defaults

// Default values for configurable parameters
/// Default width of a mosaic cell in pixels
pub const DEFAULT_PIECE_WIDTH: u32 = 25;
/// Default height of a mosaic cell in pixels
pub const DEFAULT_PIECE_HEIGHT: u32 = 25;

/// Default bucket width for color quantization
pub const DEFAULT_QUANTUM: u16 = 10;

// Source library layout
/// Root directory holding thumbnail sets and palette caches
pub const DEFAULT_LIBRARY_ROOT: &str = "img_sets";
/// Directory under the library root holding palette cache files
pub const CACHE_DIR_NAME: &str = "img_jsons";
/// Directory under each set holding generated thumbnails
pub const THUMBNAIL_DIR_NAME: &str = "thumbnails";
/// Suffix added to thumbnail file stems
pub const THUMBNAIL_SUFFIX: &str = "_thumbnail";

/// File extensions accepted as input and source images
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

// Output settings
/// Infix placed between the input stem and the source set name
pub const OUTPUT_INFIX: &str = "_mosaic";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;
