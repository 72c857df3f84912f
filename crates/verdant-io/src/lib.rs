#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for file access and encoding/decoding failures.
pub mod error;

/// High-level image reading functions.
///
/// Every reader normalizes its input to 8-bit BGR, the representation the
/// segmentation thresholds are defined in. See [`functional::read_image_bgr8`].
pub mod functional;

/// PNG image encoding.
pub mod png;

pub use crate::error::IoError;
pub use crate::functional::PixelFormat;
