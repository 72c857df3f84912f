use verdant_image::{Image, ImageError};

use crate::parallel;

/// Value written to a mask for pixels that pass a test.
pub const MASK_ON: u8 = 255;

/// Check if the pixel values are within the specified range.
///
/// Both bounds are inclusive and are applied channel by channel; a pixel
/// passes only when every channel is in range.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels and type.
/// * `dst` - The output mask, 255 where the pixel is in range and 0 otherwise.
/// * `lower_bound` - The lower bound for each channel.
/// * `upper_bound` - The upper bound for each channel.
///
/// # Examples
///
/// ```
/// use verdant_image::{Image, ImageSize};
/// use verdant_imgproc::threshold::in_range;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
///
/// let image = Image::<u8, 3>::new(
///    ImageSize {
///       width: 2,
///       height: 1,
///    },
///    data,
/// )
/// .unwrap();
///
/// let mut thresholded = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// in_range(&image, &mut thresholded, &[100, 150, 0], &[200, 200, 200]).unwrap();
///
/// assert_eq!(thresholded.get_pixel(0, 0, 0).unwrap(), &255);
/// assert_eq!(thresholded.get_pixel(1, 0, 0).unwrap(), &0);
/// ```
pub fn in_range<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<u8, 1>,
    lower_bound: &[T; C],
    upper_bound: &[T; C],
) -> Result<(), ImageError>
where
    T: Send + Sync + PartialOrd,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        for c in 0..C {
            let v = &src_pixel[c];
            if *v < lower_bound[c] || *v > upper_bound[c] {
                dst_pixel[0] = 0;
                return;
            }
        }
        dst_pixel[0] = MASK_ON;
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use verdant_image::{Image, ImageError, ImageSize};

    #[test]
    fn in_range_bounds_inclusive() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 4,
                height: 1,
            },
            vec![
                35, 40, 40, // lower corner
                85, 255, 255, // upper corner
                34, 200, 200, // hue below
                60, 39, 200, // saturation below
            ],
        )?;

        let mut mask = Image::<u8, 1>::from_size_val(image.size(), 0)?;
        super::in_range(&image, &mut mask, &[35, 40, 40], &[85, 255, 255])?;

        assert_eq!(mask.as_slice(), &[255, 255, 0, 0]);

        Ok(())
    }

    #[test]
    fn in_range_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;
        let mut mask = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 1,
            },
            0,
        )?;
        let res = super::in_range(&image, &mut mask, &[0, 0, 0], &[1, 1, 1]);
        assert_eq!(res, Err(ImageError::InvalidImageSize(2, 2, 2, 1)));
        Ok(())
    }
}
