use rayon::prelude::*;
use verdant_image::{Image, ImageError};

use crate::parallel;

fn check_same_size<T1, const C1: usize, T2, const C2: usize>(
    a: &Image<T1, C1>,
    b: &Image<T2, C2>,
) -> Result<(), ImageError> {
    if a.size() != b.size() {
        return Err(ImageError::InvalidImageSize(
            a.width(),
            a.height(),
            b.width(),
            b.height(),
        ));
    }
    Ok(())
}

/// Perform a bitwise AND operation between two single channel images.
///
/// # Arguments
///
/// * `src1` - The first input image.
/// * `src2` - The second input image.
/// * `dst` - The output image.
///
/// # Example
///
/// ```
/// use verdant_image::{Image, ImageSize};
/// use verdant_imgproc::core::bitwise_and;
///
/// let size = ImageSize { width: 2, height: 2 };
/// let a = Image::<u8, 1>::new(size, vec![255, 255, 0, 0]).unwrap();
/// let b = Image::<u8, 1>::new(size, vec![255, 0, 255, 0]).unwrap();
/// let mut out = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// bitwise_and(&a, &b, &mut out).unwrap();
///
/// assert_eq!(out.as_slice(), &[255, 0, 0, 0]);
/// ```
pub fn bitwise_and(
    src1: &Image<u8, 1>,
    src2: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
) -> Result<(), ImageError> {
    check_same_size(src1, src2)?;
    check_same_size(src1, dst)?;

    parallel::par_iter_rows_val_two(src1, src2, dst, |a, b, out| {
        *out = a & b;
    });

    Ok(())
}

/// Perform a bitwise OR operation between two single channel images.
///
/// # Arguments
///
/// * `src1` - The first input image.
/// * `src2` - The second input image.
/// * `dst` - The output image.
pub fn bitwise_or(
    src1: &Image<u8, 1>,
    src2: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
) -> Result<(), ImageError> {
    check_same_size(src1, src2)?;
    check_same_size(src1, dst)?;

    parallel::par_iter_rows_val_two(src1, src2, dst, |a, b, out| {
        *out = a | b;
    });

    Ok(())
}

/// Invert every bit of a single channel image.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image.
pub fn bitwise_not(src: &Image<u8, 1>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    parallel::par_iter_rows_val(src, dst, |a, out| {
        *out = !a;
    });

    Ok(())
}

/// Count the pixels of a single channel image that are not zero.
///
/// # Example
///
/// ```
/// use verdant_image::{Image, ImageSize};
/// use verdant_imgproc::core::count_nonzero;
///
/// let mask = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![0, 7, 255]).unwrap();
/// assert_eq!(count_nonzero(&mask), 2);
/// ```
pub fn count_nonzero(src: &Image<u8, 1>) -> usize {
    src.as_slice().par_iter().filter(|&&v| v != 0).count()
}
