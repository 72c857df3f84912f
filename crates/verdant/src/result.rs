use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use verdant_imgproc::parallel::ExecutionStrategy;

/// Outcome of one analysis.
///
/// The artifact paths are `None` when no output directory was given, when
/// the visualization is disabled, or when writing the file failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Share of vegetation pixels in percent, rounded to 2 decimals.
    pub coverage_percentage: f64,
    /// Estimated carbon in tonnes, rounded to 3 decimals.
    pub carbon_value: f64,
    /// Width of the analyzed image.
    pub image_width: usize,
    /// Height of the analyzed image.
    pub image_height: usize,
    /// Number of pixels of the analyzed image.
    pub total_pixels: usize,
    /// Number of pixels classified as vegetation.
    pub vegetation_pixels: usize,
    /// Path of the written binary mask.
    pub mask_output_path: Option<PathBuf>,
    /// Path of the written overlay.
    pub visualization_output_path: Option<PathBuf>,
}

/// Liveness report of an analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerStatus {
    /// Always `"healthy"` for a constructed analyzer.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// The configured execution strategy.
    pub execution: ExecutionStrategy,
    /// Worker threads the strategy resolves to.
    pub num_threads: usize,
}
