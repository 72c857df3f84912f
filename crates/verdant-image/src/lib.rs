#![deny(missing_docs)]
//! Owned pixel buffers shared by the verdant crates.

/// The [`Image`] container and its [`ImageSize`].
pub mod image;

/// [`ImageError`].
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
