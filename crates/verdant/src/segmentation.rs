use verdant_image::{Image, ImageError};
use verdant_imgproc::{
    color::{gray_from_bgr, hsv_from_bgr},
    core::{bitwise_and, bitwise_not, bitwise_or},
    edges::canny,
    morphology::{close, dilate, open, BorderMode, Kernel, KernelShape},
    threshold::in_range,
};

/// A binary vegetation mask, 255 on vegetation and 0 elsewhere.
pub type Mask = Image<u8, 1>;

/// Inclusive HSV band `(lower, upper)` on the half-degree hue scale.
pub type HsvBand = ([u8; 3], [u8; 3]);

/// Core green hues.
pub const GREEN_BAND: HsvBand = ([35, 40, 40], [85, 255, 255]);

/// Wider band catching yellowish and bluish foliage.
pub const EXTENDED_GREEN_BAND: HsvBand = ([25, 40, 40], [95, 255, 255]);

/// Side of the square kernel used to close and open the color mask.
pub const CLEANUP_KERNEL_SIZE: usize = 5;

/// Side of the square kernel used to grow the non-edge map.
pub const EDGE_KERNEL_SIZE: usize = 3;

/// Canny hysteresis thresholds `(low, high)`.
pub const CANNY_THRESHOLDS: (f32, f32) = (50.0, 150.0);

/// Segment vegetation by color.
///
/// A pixel is kept when its HSV value falls in either [`GREEN_BAND`] or
/// [`EXTENDED_GREEN_BAND`]. The union is then closed and opened with a 5x5
/// box to fill pin holes and drop isolated specks.
pub fn segment_color(src: &Image<u8, 3>) -> Result<Mask, ImageError> {
    let mut hsv = Image::<u8, 3>::from_size_val(src.size(), 0)?;
    hsv_from_bgr(src, &mut hsv)?;

    let mut band = Mask::from_size_val(src.size(), 0)?;
    let mut extended = Mask::from_size_val(src.size(), 0)?;
    in_range(&hsv, &mut band, &GREEN_BAND.0, &GREEN_BAND.1)?;
    in_range(
        &hsv,
        &mut extended,
        &EXTENDED_GREEN_BAND.0,
        &EXTENDED_GREEN_BAND.1,
    )?;

    let mut union = Mask::from_size_val(src.size(), 0)?;
    bitwise_or(&band, &extended, &mut union)?;

    let kernel = Kernel::new(KernelShape::Box {
        size: CLEANUP_KERNEL_SIZE,
    });
    let mut closed = Mask::from_size_val(src.size(), 0)?;
    close(&union, &mut closed, &kernel, BorderMode::Ignore)?;

    let mut mask = Mask::from_size_val(src.size(), 0)?;
    open(&closed, &mut mask, &kernel, BorderMode::Ignore)?;

    Ok(mask)
}

/// Drop mask pixels that sit on strong intensity edges.
///
/// Canny edges of the grayscale image are inverted, the resulting non-edge
/// map is dilated with a 3x3 box and intersected with `color_mask`.
pub fn refine_with_edges(src: &Image<u8, 3>, color_mask: &Mask) -> Result<Mask, ImageError> {
    if src.size() != color_mask.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            color_mask.width(),
            color_mask.height(),
        ));
    }

    let mut gray = Mask::from_size_val(src.size(), 0)?;
    gray_from_bgr(src, &mut gray)?;

    let mut edges = Mask::from_size_val(src.size(), 0)?;
    canny(&gray, &mut edges, CANNY_THRESHOLDS.0, CANNY_THRESHOLDS.1)?;

    let mut non_edges = Mask::from_size_val(src.size(), 0)?;
    bitwise_not(&edges, &mut non_edges)?;

    let kernel = Kernel::new(KernelShape::Box {
        size: EDGE_KERNEL_SIZE,
    });
    let mut grown = Mask::from_size_val(src.size(), 0)?;
    dilate(&non_edges, &mut grown, &kernel, BorderMode::Ignore)?;

    let mut refined = Mask::from_size_val(src.size(), 0)?;
    bitwise_and(color_mask, &grown, &mut refined)?;

    log::debug!(
        "edge refinement on {}: {} edge pixels",
        src.size(),
        edges.as_slice().iter().filter(|&&v| v != 0).count()
    );

    Ok(refined)
}

/// Full segmentation: [`segment_color`] followed by [`refine_with_edges`].
pub fn segment(src: &Image<u8, 3>) -> Result<Mask, ImageError> {
    let color_mask = segment_color(src)?;
    refine_with_edges(src, &color_mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_image::ImageSize;

    fn fill_rect(
        img: &mut Image<u8, 3>,
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
        bgr: [u8; 3],
    ) {
        let width = img.width();
        let data = img.as_slice_mut();
        for y in rows {
            for x in cols.clone() {
                let start = (y * width + x) * 3;
                data[start..start + 3].copy_from_slice(&bgr);
            }
        }
    }

    fn count(mask: &Mask) -> usize {
        mask.as_slice().iter().filter(|&&v| v == 255).count()
    }

    #[test]
    fn uniform_green_is_fully_segmented() -> Result<(), ImageError> {
        // hsv (60, 200, 200)
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 32,
                height: 24,
            },
            [43, 200, 43].repeat(32 * 24),
        )?;
        let mask = segment(&image)?;
        assert_eq!(count(&mask), 32 * 24);
        assert!(mask.as_slice().iter().all(|&v| v == 0 || v == 255));
        Ok(())
    }

    #[test]
    fn black_and_gray_are_not_vegetation() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 16,
            height: 16,
        };
        let black = Image::<u8, 3>::from_size_val(size, 0)?;
        let gray = Image::<u8, 3>::from_size_val(size, 128)?;
        assert_eq!(count(&segment(&black)?), 0);
        assert_eq!(count(&segment(&gray)?), 0);
        Ok(())
    }

    #[test]
    fn extended_band_hues_are_kept() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 12,
            height: 12,
        };
        // bgr (0, 255, 255) is yellow: hue 30, only in the extended band
        let yellow = Image::<u8, 3>::new(size, [0, 255, 255].repeat(144))?;
        assert_eq!(count(&segment_color(&yellow)?), 144);

        // bgr (0, 0, 255) is red: hue 0, in neither band
        let red = Image::<u8, 3>::new(size, [0, 0, 255].repeat(144))?;
        assert_eq!(count(&segment_color(&red)?), 0);
        Ok(())
    }

    #[test]
    fn small_specks_are_removed() -> Result<(), ImageError> {
        let mut image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 20,
                height: 20,
            },
            0,
        )?;
        fill_rect(&mut image, 8..11, 8..11, [0, 255, 0]);
        assert_eq!(count(&segment_color(&image)?), 0);
        Ok(())
    }

    #[test]
    fn two_rectangles_color_mask() -> Result<(), ImageError> {
        let mut image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 400,
                height: 300,
            },
            0,
        )?;
        fill_rect(&mut image, 50..150, 50..150, [0, 255, 0]);
        fill_rect(&mut image, 200..250, 200..300, [0, 200, 0]);

        let color_mask = segment_color(&image)?;
        assert_eq!(count(&color_mask), 15_000);

        let refined = refine_with_edges(&image, &color_mask)?;
        assert_eq!(count(&refined), 15_000);
        assert_eq!(refined, color_mask);
        Ok(())
    }

    #[test]
    fn refine_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            0,
        )?;
        let mask = Mask::from_size_val(
            ImageSize {
                width: 4,
                height: 3,
            },
            0,
        )?;
        assert_eq!(
            refine_with_edges(&image, &mask),
            Err(ImageError::InvalidImageSize(4, 4, 4, 3))
        );
        Ok(())
    }
}
