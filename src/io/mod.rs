//! Input/output surfaces around the mosaic core

/// Command-line parsing and batch processing
pub mod cli;
/// Default values and layout constants
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Image decoding, cropping and PNG export
pub mod image;
/// Source image preprocessing and palette cache
pub mod library;
/// Terminal logger setup
pub mod logging;
/// Progress display for batch builds
pub mod progress;
