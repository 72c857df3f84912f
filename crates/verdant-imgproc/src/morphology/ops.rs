use rayon::prelude::*;
use verdant_image::{Image, ImageError};

use super::kernel::Kernel;

/// Border handling modes for morphological operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode<T> {
    /// Skip kernel taps that fall outside the image.
    ///
    /// The border never wins the min/max, so foreground touching the image
    /// edge is neither eroded nor grown by the border.
    #[default]
    Ignore,

    /// Out-of-bounds taps read the given constant.
    Constant(T),

    /// Out-of-bounds taps read the nearest border pixel.
    Replicate,
}

#[derive(Clone, Copy)]
enum Reduce {
    Min,
    Max,
}

fn morph_reduce<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel,
    border: BorderMode<T>,
    reduce: Reduce,
) -> Result<(), ImageError>
where
    T: Copy + Ord + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    if src.is_empty() {
        return Ok(());
    }

    let width = src.width() as isize;
    let height = src.height() as isize;
    let offsets = kernel.offsets();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(src.width() * C)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as isize;
            for x in 0..width {
                for c in 0..C {
                    let mut acc: Option<T> = None;

                    for &(dy, dx) in offsets.iter() {
                        let (py, px) = (y + dy, x + dx);
                        let inside = py >= 0 && py < height && px >= 0 && px < width;

                        let val = match border {
                            _ if inside => src_data[((py * width + px) as usize) * C + c],
                            BorderMode::Ignore => continue,
                            BorderMode::Constant(v) => v,
                            BorderMode::Replicate => {
                                let py = py.clamp(0, height - 1);
                                let px = px.clamp(0, width - 1);
                                src_data[((py * width + px) as usize) * C + c]
                            }
                        };

                        acc = Some(match (acc, reduce) {
                            (None, _) => val,
                            (Some(a), Reduce::Min) => a.min(val),
                            (Some(a), Reduce::Max) => a.max(val),
                        });
                    }

                    // no tap landed inside: keep the source value
                    let idx = (x as usize) * C + c;
                    row[idx] = acc.unwrap_or(src_data[((y * width + x) as usize) * C + c]);
                }
            }
        });

    Ok(())
}

/// Dilate an image using a [`Kernel`].
///
/// Each pixel is replaced by the maximum value in the neighborhood defined
/// by the kernel, growing bright regions.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten).
/// * `kernel` - The morphological structuring element.
/// * `border` - The border handling mode.
///
/// # Example
///
/// ```
/// use verdant_image::{Image, ImageSize};
/// use verdant_imgproc::morphology::{dilate, BorderMode, Kernel, KernelShape};
///
/// let size = ImageSize { width: 3, height: 3 };
/// let src = Image::<u8, 1>::new(size, vec![0, 0, 0, 0, 255, 0, 0, 0, 0]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// let kernel = Kernel::new(KernelShape::Box { size: 3 });
/// dilate(&src, &mut dst, &kernel, BorderMode::Ignore).unwrap();
///
/// assert!(dst.as_slice().iter().all(|&v| v == 255));
/// ```
pub fn dilate<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel,
    border: BorderMode<T>,
) -> Result<(), ImageError>
where
    T: Copy + Ord + Send + Sync,
{
    morph_reduce(src, dst, kernel, border, Reduce::Max)
}

/// Erode an image using a [`Kernel`].
///
/// Each pixel is replaced by the minimum value in the neighborhood defined
/// by the kernel, shrinking bright regions.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The destination image (will be overwritten).
/// * `kernel` - The morphological structuring element.
/// * `border` - The border handling mode.
pub fn erode<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel,
    border: BorderMode<T>,
) -> Result<(), ImageError>
where
    T: Copy + Ord + Send + Sync,
{
    morph_reduce(src, dst, kernel, border, Reduce::Min)
}

/// Opening: erosion followed by dilation.
///
/// Removes bright specks smaller than the kernel.
pub fn open<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel,
    border: BorderMode<T>,
) -> Result<(), ImageError>
where
    T: Copy + Ord + Send + Sync,
{
    let mut temp_img = src.clone();
    erode(src, &mut temp_img, kernel, border)?;
    dilate(&temp_img, dst, kernel, border)?;
    Ok(())
}

/// Closing: dilation followed by erosion.
///
/// Fills dark holes smaller than the kernel.
pub fn close<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &Kernel,
    border: BorderMode<T>,
) -> Result<(), ImageError>
where
    T: Copy + Ord + Send + Sync,
{
    let mut temp_img = src.clone();
    dilate(src, &mut temp_img, kernel, border)?;
    erode(&temp_img, dst, kernel, border)?;
    Ok(())
}
