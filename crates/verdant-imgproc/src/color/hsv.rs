use crate::parallel;
use verdant_image::{Image, ImageError};

/// Largest hue value in the half-degree convention (exclusive).
pub const HUE_RANGE: u8 = 180;

/// Convert a BGR8 image to an 8-bit HSV image.
///
/// The input image is assumed to have 3 channels in the order B, G, R.
///
/// # Arguments
///
/// * `src` - The input BGR image assumed to have 3 channels.
/// * `dst` - The output HSV image.
///
/// # Returns
///
/// The HSV image with the following channels:
///
/// * H: The hue channel in the range [0, 180) (half degrees).
/// * S: The saturation channel in the range [0, 255].
/// * V: The value channel in the range [0, 255].
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use verdant_image::{Image, ImageSize};
/// use verdant_imgproc::color::hsv_from_bgr;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 1,
///         height: 1,
///     },
///     vec![43, 200, 43],
/// )
/// .unwrap();
///
/// let mut hsv = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// hsv_from_bgr(&image, &mut hsv).unwrap();
///
/// assert_eq!(hsv.as_slice(), &[60, 200, 200]);
/// ```
pub fn hsv_from_bgr(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let b = src_pixel[0] as i32;
        let g = src_pixel[1] as i32;
        let r = src_pixel[2] as i32;

        let v = b.max(g).max(r);
        let delta = v - b.min(g).min(r);

        let s = if v == 0 {
            0
        } else {
            round_div(delta * 255, v)
        };

        // sector offsets are in units of delta, 30 half-degrees per unit
        let h = if delta == 0 {
            0
        } else {
            let sector = if v == r {
                g - b
            } else if v == g {
                b - r + 2 * delta
            } else {
                r - g + 4 * delta
            };
            let h = (sector as f32 * 30.0 / delta as f32 + 0.5).floor() as i32;
            if h < 0 {
                h + HUE_RANGE as i32
            } else {
                h
            }
        };

        dst_pixel[0] = h as u8;
        dst_pixel[1] = s as u8;
        dst_pixel[2] = v as u8;
    });

    Ok(())
}

#[inline]
fn round_div(num: i32, den: i32) -> i32 {
    (num as f32 / den as f32 + 0.5).floor() as i32
}
