#![deny(missing_docs)]
//! Vegetation coverage and carbon estimation from a single photograph.
//!
//! The [`VegetationAnalyzer`] segments green vegetation with a two band HSV
//! threshold, cleans the mask with morphology, removes edge pixels and turns
//! the resulting pixel fraction into a carbon estimate.

#[doc(inline)]
pub use verdant_image as image;

#[doc(inline)]
pub use verdant_imgproc as imgproc;

#[doc(inline)]
pub use verdant_io as io;

/// The end-to-end analysis pipeline.
pub mod analyzer;

/// Coverage and carbon arithmetic.
pub mod carbon;

/// Analyzer configuration.
pub mod config;

/// Error types for the analyzer.
pub mod error;

/// Serializable analysis outcomes.
pub mod result;

/// Color segmentation and edge refinement of vegetation masks.
pub mod segmentation;

/// Rendering of the mask overlay.
pub mod visualization;

pub use crate::analyzer::VegetationAnalyzer;
pub use crate::config::AnalyzerConfig;
pub use crate::error::AnalyzerError;
pub use crate::result::{AnalysisResult, AnalyzerStatus};
