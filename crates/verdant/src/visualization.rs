use verdant_image::Image;
use verdant_imgproc::draw::{add_weighted, draw_text};

use crate::carbon::Coverage;
use crate::error::AnalyzerError;

/// Color painted on vegetation pixels, in BGR.
pub const OVERLAY_COLOR: [u8; 3] = [0, 255, 0];

/// Color of the coverage label, in BGR.
pub const LABEL_COLOR: [u8; 3] = [255, 255, 255];

/// Bottom-left corner of the coverage label.
pub const LABEL_ORIGIN: (i64, i64) = (10, 30);

/// Size of one font pixel of the label.
pub const LABEL_SCALE: usize = 3;

const MASK_WEIGHT: f32 = 0.6;
const IMAGE_WEIGHT: f32 = 0.4;

/// Text of the coverage label, with one decimal.
pub fn coverage_label(coverage_percentage: f64) -> String {
    format!("Greenery: {coverage_percentage:.1}%")
}

/// Render the vegetation overlay of `mask` on top of `image`.
///
/// Vegetation pixels are painted [`OVERLAY_COLOR`] and the paint layer is
/// blended 0.6 to 0.4 with the photograph, which dims everything outside the
/// mask. The coverage of `mask` is written in the top-left corner.
///
/// # Errors
///
/// Fails when `image` and `mask` differ in size or are empty.
pub fn render_overlay(
    image: &Image<u8, 3>,
    mask: &Image<u8, 1>,
) -> Result<Image<u8, 3>, AnalyzerError> {
    let coverage = Coverage::from_mask(mask)?;
    if image.size() != mask.size() {
        return Err(verdant_image::ImageError::InvalidImageSize(
            image.width(),
            image.height(),
            mask.width(),
            mask.height(),
        )
        .into());
    }

    let paint: Vec<u8> = mask
        .as_slice()
        .iter()
        .flat_map(|&m| if m != 0 { OVERLAY_COLOR } else { [0; 3] })
        .collect();
    let paint = Image::<u8, 3>::new(image.size(), paint)?;

    let mut overlay = Image::<u8, 3>::from_size_val(image.size(), 0)?;
    add_weighted(&paint, MASK_WEIGHT, image, IMAGE_WEIGHT, 0.0, &mut overlay)?;

    draw_text(
        &mut overlay,
        &coverage_label(coverage.percentage()),
        LABEL_ORIGIN,
        LABEL_COLOR,
        LABEL_SCALE,
    );

    Ok(overlay)
}
