use std::path::{Path, PathBuf};

use verdant_image::{Image, ImageError, ImageSize};
use verdant_io::{
    functional::{decode_image_bgr8, image_from_raw, read_image_bgr8},
    png::{write_image_png_bgr8, write_image_png_gray8},
    IoError, PixelFormat,
};

use crate::{
    carbon::{estimate_carbon_value, round_to, Coverage},
    config::AnalyzerConfig,
    error::AnalyzerError,
    result::{AnalysisResult, AnalyzerStatus},
    segmentation::{segment, Mask},
    visualization::render_overlay,
};

/// Estimates vegetation coverage and carbon from photographs.
///
/// The analyzer holds no per-image state: every call allocates its own
/// buffers, so a single instance can be shared between threads.
///
/// # Example
///
/// ```
/// use verdant::{AnalyzerConfig, VegetationAnalyzer};
/// use verdant::image::{Image, ImageSize};
///
/// let analyzer = VegetationAnalyzer::new(AnalyzerConfig::default()).unwrap();
/// let size = ImageSize { width: 16, height: 16 };
/// let image = Image::<u8, 3>::from_size_val(size, 0).unwrap();
///
/// let result = analyzer.analyze_image(&image, None).unwrap();
/// assert_eq!(result.coverage_percentage, 0.0);
/// assert_eq!(result.carbon_value, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct VegetationAnalyzer {
    config: AnalyzerConfig,
}

impl VegetationAnalyzer {
    /// Create an analyzer from a validated configuration.
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalyzerError> {
        config.validate()?;
        log::debug!(
            "vegetation analyzer ready: {:?} on {} thread(s)",
            config.execution,
            config.execution.num_threads()
        );
        Ok(Self { config })
    }

    /// The configuration in use.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Report that the analyzer is usable and how it will execute.
    pub fn status(&self) -> AnalyzerStatus {
        AnalyzerStatus {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            execution: self.config.execution,
            num_threads: self.config.execution.num_threads(),
        }
    }

    /// Analyze the image stored at `path`.
    ///
    /// # Errors
    ///
    /// [`AnalyzerError::Load`] when the file is missing or not a supported image.
    pub fn analyze_path(
        &self,
        path: impl AsRef<Path>,
        output_dir: Option<&Path>,
    ) -> Result<AnalysisResult, AnalyzerError> {
        let path = path.as_ref();
        log::info!("analyzing {}", path.display());
        let image = read_image_bgr8(path)?;
        self.analyze_image(&image, output_dir)
    }

    /// Analyze an encoded image held in memory, such as an uploaded file.
    pub fn analyze_bytes(
        &self,
        bytes: &[u8],
        output_dir: Option<&Path>,
    ) -> Result<AnalysisResult, AnalyzerError> {
        log::info!("analyzing {} encoded bytes", bytes.len());
        let image = decode_image_bgr8(bytes)?;
        self.analyze_image(&image, output_dir)
    }

    /// Analyze an already decoded pixel buffer.
    pub fn analyze_raw(
        &self,
        size: ImageSize,
        data: &[u8],
        format: PixelFormat,
        output_dir: Option<&Path>,
    ) -> Result<AnalysisResult, AnalyzerError> {
        let image = image_from_raw(size, data, format)?;
        self.analyze_image(&image, output_dir)
    }

    /// Analyze a BGR8 image.
    ///
    /// When `output_dir` is given it is created if needed and the mask (and
    /// the overlay, if enabled) are written into it. Failing writes are
    /// logged and reported as absent paths; they never fail the analysis.
    ///
    /// # Errors
    ///
    /// [`AnalyzerError::InvalidImage`] when the image has no pixels.
    pub fn analyze_image(
        &self,
        image: &Image<u8, 3>,
        output_dir: Option<&Path>,
    ) -> Result<AnalysisResult, AnalyzerError> {
        if image.is_empty() {
            return Err(AnalyzerError::InvalidImage(format!(
                "image has zero area ({})",
                image.size()
            )));
        }

        // one pool for every pixel kernel of this call
        let render = output_dir.is_some() && self.config.visualize;
        let (mask, overlay) = self.config.execution.install(|| {
            let mask = segment(image)?;
            let overlay = render.then(|| render_overlay(image, &mask));
            Ok::<_, ImageError>((mask, overlay))
        })??;
        let coverage = Coverage::from_mask(&mask)?;

        let coverage_percentage = round_to(coverage.percentage(), 2);
        let carbon_value = estimate_carbon_value(coverage_percentage, self.config.area_hectares);

        log::info!(
            "{}: {} of {} pixels are vegetation ({coverage_percentage}%), carbon {carbon_value}",
            image.size(),
            coverage.vegetation_pixels,
            coverage.total_pixels,
        );

        let (mask_output_path, visualization_output_path) = match output_dir {
            Some(dir) => self.write_artifacts(dir, &mask, overlay),
            None => (None, None),
        };

        Ok(AnalysisResult {
            coverage_percentage,
            carbon_value,
            image_width: image.width(),
            image_height: image.height(),
            total_pixels: coverage.total_pixels,
            vegetation_pixels: coverage.vegetation_pixels,
            mask_output_path,
            visualization_output_path,
        })
    }

    fn write_artifacts(
        &self,
        dir: &Path,
        mask: &Mask,
        overlay: Option<Result<Image<u8, 3>, AnalyzerError>>,
    ) -> (Option<PathBuf>, Option<PathBuf>) {
        if let Err(e) = std::fs::create_dir_all(dir) {
            let err = AnalyzerError::OutputWrite {
                path: dir.to_path_buf(),
                source: IoError::FileError(e),
            };
            log::warn!("skipping output artifacts: {err}");
            return (None, None);
        }

        let mask_path = dir.join(&self.config.mask_file_name);
        let mask_output_path = self
            .write_mask(&mask_path, mask)
            .map_err(|e| log::warn!("mask not saved: {e}"))
            .ok();

        let visualization_output_path = overlay.and_then(|overlay| {
            let overlay_path = dir.join(&self.config.visualization_file_name);
            self.write_overlay(&overlay_path, overlay)
                .map_err(|e| log::warn!("visualization not saved: {e}"))
                .ok()
        });

        (mask_output_path, visualization_output_path)
    }

    fn write_mask(&self, path: &Path, mask: &Mask) -> Result<PathBuf, AnalyzerError> {
        write_image_png_gray8(path, mask).map_err(|source| AnalyzerError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("mask saved to {}", path.display());
        Ok(path.to_path_buf())
    }

    fn write_overlay(
        &self,
        path: &Path,
        overlay: Result<Image<u8, 3>, AnalyzerError>,
    ) -> Result<PathBuf, AnalyzerError> {
        let overlay = overlay?;
        write_image_png_bgr8(path, &overlay).map_err(|source| AnalyzerError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("visualization saved to {}", path.display());
        Ok(path.to_path_buf())
    }
}
