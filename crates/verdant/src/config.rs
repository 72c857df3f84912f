use std::path::Path;

use serde::{Deserialize, Serialize};
use verdant_imgproc::parallel::ExecutionStrategy;

use crate::error::AnalyzerError;

/// File name of the binary mask written to the output directory.
pub const MASK_FILE_NAME: &str = "greenery_mask.png";

/// File name of the overlay written to the output directory.
pub const VISUALIZATION_FILE_NAME: &str = "greenery_visualization.png";

/// Configuration of a [`crate::VegetationAnalyzer`].
///
/// Every field has a default, so a json file only needs the keys it changes.
///
/// # Example
///
/// ```
/// use verdant::AnalyzerConfig;
///
/// let config: AnalyzerConfig = serde_json::from_str(r#"{ "area_hectares": 2.5 }"#).unwrap();
/// assert_eq!(config.area_hectares, 2.5);
/// assert!(config.visualize);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Where the pixel kernels run.
    pub execution: ExecutionStrategy,
    /// Ground area covered by the photograph, in hectares.
    pub area_hectares: f64,
    /// Whether the overlay image is rendered and written.
    pub visualize: bool,
    /// File name of the mask artifact.
    pub mask_file_name: String,
    /// File name of the overlay artifact.
    pub visualization_file_name: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            execution: ExecutionStrategy::default(),
            area_hectares: 1.0,
            visualize: true,
            mask_file_name: MASK_FILE_NAME.to_string(),
            visualization_file_name: VISUALIZATION_FILE_NAME.to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Load a configuration from a json file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|source| AnalyzerError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field holds a usable value.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if !self.area_hectares.is_finite() || self.area_hectares < 0.0 {
            return Err(AnalyzerError::InvalidConfig(format!(
                "area_hectares must be a finite non-negative number, got {}",
                self.area_hectares
            )));
        }

        if let ExecutionStrategy::Fixed(0) = self.execution {
            return Err(AnalyzerError::InvalidConfig(
                "a fixed execution strategy needs at least one thread".to_string(),
            ));
        }

        for name in [&self.mask_file_name, &self.visualization_file_name] {
            let is_plain = Path::new(name).file_name().is_some_and(|f| f == name.as_str());
            if !is_plain {
                return Err(AnalyzerError::InvalidConfig(format!(
                    "artifact name must be a plain file name, got {name:?}"
                )));
            }
        }

        if self.mask_file_name == self.visualization_file_name {
            return Err(AnalyzerError::InvalidConfig(
                "mask and visualization must use different file names".to_string(),
            ));
        }

        Ok(())
    }
}
