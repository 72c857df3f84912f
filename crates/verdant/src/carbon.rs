use verdant_image::Image;
use verdant_imgproc::core::count_nonzero;

use crate::error::AnalyzerError;

/// Tonnes of carbon per hectare held by fully vegetated ground.
pub const CARBON_DENSITY_PER_HECTARE: f64 = 2.6;

/// Share of the nominal density credited to urban greenery.
pub const URBAN_VEGETATION_FACTOR: f64 = 0.7;

/// Round `value` half away from zero to `decimals` decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Pixel counts of a vegetation mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    /// Pixels marked as vegetation.
    pub vegetation_pixels: usize,
    /// All pixels of the mask.
    pub total_pixels: usize,
}

impl Coverage {
    /// Count the non-zero pixels of `mask`.
    ///
    /// # Errors
    ///
    /// [`AnalyzerError::InvalidImage`] when the mask has no pixels.
    pub fn from_mask(mask: &Image<u8, 1>) -> Result<Self, AnalyzerError> {
        if mask.is_empty() {
            return Err(AnalyzerError::InvalidImage(format!(
                "cannot measure coverage of an empty {} mask",
                mask.size()
            )));
        }

        Ok(Self {
            vegetation_pixels: count_nonzero(mask),
            total_pixels: mask.size().area(),
        })
    }

    /// Unrounded share of vegetation pixels, in percent.
    pub fn percentage(&self) -> f64 {
        self.vegetation_pixels as f64 / self.total_pixels as f64 * 100.0
    }
}

/// Vegetation coverage of `mask` in percent, rounded to 2 decimals.
///
/// # Example
///
/// ```
/// use verdant::carbon::coverage_percentage;
/// use verdant::image::{Image, ImageSize};
///
/// let size = ImageSize { width: 3, height: 1 };
/// let mask = Image::<u8, 1>::new(size, vec![255, 0, 0]).unwrap();
/// assert_eq!(coverage_percentage(&mask).unwrap(), 33.33);
/// ```
pub fn coverage_percentage(mask: &Image<u8, 1>) -> Result<f64, AnalyzerError> {
    Ok(round_to(Coverage::from_mask(mask)?.percentage(), 2))
}

/// Estimated carbon in tonnes, rounded to 3 decimals.
///
/// Computes `2.6 * area_hectares * coverage / 100 * 0.7`.
///
/// # Arguments
///
/// * `coverage_percentage` - Vegetation coverage in `[0, 100]`.
/// * `area_hectares` - Ground area of the photograph.
pub fn estimate_carbon_value(coverage_percentage: f64, area_hectares: f64) -> f64 {
    let carbon = CARBON_DENSITY_PER_HECTARE
        * area_hectares
        * (coverage_percentage / 100.0)
        * URBAN_VEGETATION_FACTOR;
    round_to(carbon, 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use verdant_image::ImageSize;

    #[test]
    fn carbon_value() {
        assert_relative_eq!(estimate_carbon_value(50.0, 1.0), 0.91);
        assert_relative_eq!(estimate_carbon_value(100.0, 1.0), 1.82);
        assert_relative_eq!(estimate_carbon_value(100.0, 2.0), 3.64);
        assert_eq!(estimate_carbon_value(0.0, 1.0), 0.0);
        assert_eq!(estimate_carbon_value(37.5, 0.0), 0.0);
        // 2.6 * 0.1234 * 0.7 = 0.224588
        assert_relative_eq!(estimate_carbon_value(12.34, 1.0), 0.225);
    }

    #[test]
    fn rounding() {
        assert_relative_eq!(round_to(12.3456, 2), 12.35);
        assert_relative_eq!(round_to(0.0004, 3), 0.0);
        assert_relative_eq!(round_to(99.994, 2), 99.99);
    }

    #[test]
    fn coverage_from_mask() -> Result<(), AnalyzerError> {
        let size = ImageSize {
            width: 4,
            height: 2,
        };
        let mask = Image::<u8, 1>::new(size, vec![255, 255, 0, 0, 0, 0, 0, 1])?;
        let coverage = Coverage::from_mask(&mask)?;
        assert_eq!(coverage.vegetation_pixels, 3);
        assert_eq!(coverage.total_pixels, 8);
        assert_relative_eq!(coverage.percentage(), 37.5);
        assert_relative_eq!(coverage_percentage(&mask)?, 37.5);
        Ok(())
    }

    #[test]
    fn coverage_of_empty_mask() -> Result<(), AnalyzerError> {
        let mask = Image::<u8, 1>::new(
            ImageSize {
                width: 0,
                height: 5,
            },
            vec![],
        )?;
        assert!(matches!(
            coverage_percentage(&mask),
            Err(AnalyzerError::InvalidImage(_))
        ));
        Ok(())
    }
}
