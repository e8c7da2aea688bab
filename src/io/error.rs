//! Error types and context management for mosaic operations

use crate::color::Color;
use crate::spatial::Region;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Image file does not exist
    ImageNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Image file exists but could not be decoded
    UnreadableImage {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to save a composited or thumbnail image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Piece width or height is zero
    InvalidDimension {
        /// Which dimension was rejected
        parameter: &'static str,
        /// Rejected value
        value: u32,
    },

    /// Average color requested for a region with no pixels
    EmptyRegion {
        /// Region being averaged, when known
        region: Option<Region>,
    },

    /// Palette color channel outside `0..=255`
    InvalidColor {
        /// Identifier of the offending palette entry
        identifier: String,
        /// Channels as supplied
        channels: [i64; 3],
    },

    /// Same identifier supplied twice with different colors
    DuplicateReference {
        /// Identifier shared by both entries
        identifier: String,
        /// Color of the first occurrence
        first: Color,
        /// Color of the conflicting occurrence
        second: Color,
    },

    /// Palette identifier does not resolve to a thumbnail
    MissingReferenceResource {
        /// Identifier that could not be resolved
        identifier: String,
    },

    /// Matching attempted against a palette with no entries
    EmptyPalette,

    /// Thumbnail dimensions differ from the piece size
    ThumbnailSizeMismatch {
        /// Identifier of the thumbnail
        identifier: String,
        /// Piece size (width, height)
        expected: (u32, u32),
        /// Thumbnail size (width, height)
        actual: (u32, u32),
    },

    /// Failure while assembling a mosaic
    ///
    /// Wraps the underlying cause together with the stage that failed.
    MosaicBuild {
        /// Assembly stage that failed
        stage: &'static str,
        /// Underlying cause
        source: Box<MosaicError>,
    },

    /// Source data doesn't meet preprocessing requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Palette cache could not be read or written as JSON
    Cache {
        /// Path of the cache file
        path: PathBuf,
        /// Underlying serialization error
        source: serde_json::Error,
    },

    /// Logger could not be installed
    Logging {
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageNotFound { path } => {
                write!(f, "Image not found: '{}'", path.display())
            }
            Self::UnreadableImage { path, source } => {
                write!(f, "Failed to read image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidDimension { parameter, value } => {
                write!(f, "Invalid dimension '{parameter}' = {value}: must be positive")
            }
            Self::EmptyRegion { region: Some(region) } => {
                write!(f, "Cannot average empty region {region}")
            }
            Self::EmptyRegion { region: None } => {
                write!(f, "Cannot average an empty pixel histogram")
            }
            Self::InvalidColor {
                identifier,
                channels,
            } => {
                write!(
                    f,
                    "Color {channels:?} of '{identifier}' has channels outside 0..=255"
                )
            }
            Self::DuplicateReference {
                identifier,
                first,
                second,
            } => {
                write!(
                    f,
                    "Reference '{identifier}' appears with conflicting colors {first} and {second}"
                )
            }
            Self::MissingReferenceResource { identifier } => {
                write!(f, "Thumbnail for reference '{identifier}' does not exist")
            }
            Self::EmptyPalette => write!(f, "Palette contains no reference entries"),
            Self::ThumbnailSizeMismatch {
                identifier,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Thumbnail '{identifier}' is {}x{}, expected {}x{}",
                    actual.0, actual.1, expected.0, expected.1
                )
            }
            Self::MosaicBuild { stage, source } => {
                write!(f, "Mosaic build failed during {stage}: {source}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::Cache { path, source } => {
                write!(f, "Palette cache '{}' is unusable: {source}", path.display())
            }
            Self::Logging { reason } => write!(f, "Failed to initialise logging: {reason}"),
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnreadableImage { source, .. } | Self::ImageExport { source, .. } => {
                Some(source)
            }
            Self::FileSystem { source, .. } => Some(source),
            Self::Cache { source, .. } => Some(source),
            Self::MosaicBuild { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl MosaicError {
    /// Innermost error, looking through any `MosaicBuild` wrappers
    pub fn cause(&self) -> &Self {
        match self {
            Self::MosaicBuild { source, .. } => source.cause(),
            other => other,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Attaches assembly-stage context to failures
pub trait WithContext<T> {
    /// Wrap any error into [`MosaicError::MosaicBuild`] for the given stage
    ///
    /// Errors that are already wrapped keep their original stage.
    ///
    /// # Errors
    ///
    /// Propagates the original error with the stage context applied
    fn in_stage(self, stage: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<MosaicError>,
{
    fn in_stage(self, stage: &'static str) -> Result<T> {
        self.map_err(|e| {
            let error: MosaicError = e.into();
            match error {
                wrapped @ MosaicError::MosaicBuild { .. } => wrapped,
                other => MosaicError::MosaicBuild {
                    stage,
                    source: Box::new(other),
                },
            }
        })
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for an operation on a path
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> MosaicError {
    MosaicError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
