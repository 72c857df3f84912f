use std::path::PathBuf;

use verdant_image::ImageError;
use verdant_imgproc::parallel::ParallelError;
use verdant_io::IoError;

/// An error type for the vegetation analyzer.
#[derive(thiserror::Error, Debug)]
pub enum AnalyzerError {
    /// The input could not be read or decoded into an image.
    #[error("failed to load image: {0}")]
    Load(#[from] IoError),

    /// The decoded image cannot be analyzed.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// An output artifact could not be written.
    #[error("failed to write {path}: {source}")]
    OutputWrite {
        /// The destination that failed.
        path: PathBuf,
        /// The underlying io error.
        #[source]
        source: IoError,
    },

    /// The configuration holds a value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    ConfigRead {
        /// The configuration path.
        path: PathBuf,
        /// The underlying io error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid json.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The worker pool could not be set up.
    #[error(transparent)]
    Execution(#[from] ParallelError),

    /// An image operation received inconsistent buffers.
    #[error(transparent)]
    Image(#[from] ImageError),
}
