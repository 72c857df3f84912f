use crate::parallel;
use verdant_image::{Image, ImageError};

/// Q14 fixed point weights (sum to 16384) for the luma conversion.
const RW: u32 = 4899;
const GW: u32 = 9617;
const BW: u32 = 1868;

const Q14_HALF: u32 = 1 << 13;

/// Convert a BGR8 image to grayscale using the formula:
///
/// Y = (4899 * R + 9617 * G + 1868 * B + 8192) >> 14
///
/// # Arguments
///
/// * `src` - The input BGR8 image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use verdant_image::{Image, ImageSize};
/// use verdant_imgproc::color::gray_from_bgr;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 1,
///     },
///     vec![0, 0, 0, 255, 255, 255],
/// )
/// .unwrap();
///
/// let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// gray_from_bgr(&image, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[0, 255]);
/// ```
pub fn gray_from_bgr(src: &Image<u8, 3>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let b = src_pixel[0] as u32;
        let g = src_pixel[1] as u32;
        let r = src_pixel[2] as u32;
        dst_pixel[0] = ((r * RW + g * GW + b * BW + Q14_HALF) >> 14) as u8;
    });

    Ok(())
}

/// Swap the first and third channel of an RGB8 image to produce BGR8.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output BGR image.
///
/// Precondition: the input and output images must have the same size.
pub fn bgr_from_rgb(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    swap_red_blue(src, dst)
}

/// Swap the first and third channel of a BGR8 image to produce RGB8.
///
/// # Arguments
///
/// * `src` - The input BGR image.
/// * `dst` - The output RGB image.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_bgr(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    swap_red_blue(src, dst)
}

fn swap_red_blue(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = src_pixel[2];
        dst_pixel[1] = src_pixel[1];
        dst_pixel[2] = src_pixel[0];
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use verdant_image::{Image, ImageError, ImageSize};

    #[test]
    fn gray_from_bgr() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![0, 0, 255, 0, 255, 0, 255, 0, 0],
        )?;

        let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0)?;
        super::gray_from_bgr(&image, &mut gray)?;

        // red, green, blue
        assert_eq!(gray.as_slice(), &[76, 150, 29]);

        Ok(())
    }

    #[test]
    fn gray_q14_rounding() -> Result<(), ImageError> {
        // pure red 128 lands on 38, an 8-bit weight table gives 39
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![0, 200, 0, 0, 0, 128, 40, 90, 200],
        )?;

        let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0)?;
        super::gray_from_bgr(&image, &mut gray)?;
        assert_eq!(gray.as_slice(), &[117, 38, 117]);

        Ok(())
    }

    #[test]
    fn bgr_rgb_swap() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1, 2, 3, 4, 5, 6],
        )?;

        let mut bgr = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        super::bgr_from_rgb(&image, &mut bgr)?;
        assert_eq!(bgr.as_slice(), &[3, 2, 1, 6, 5, 4]);

        let mut rgb = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        super::rgb_from_bgr(&bgr, &mut rgb)?;
        assert_eq!(rgb.as_slice(), image.as_slice());

        Ok(())
    }
}
