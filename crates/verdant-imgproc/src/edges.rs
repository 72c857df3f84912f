use rayon::prelude::*;
use verdant_image::{Image, ImageError};

use crate::threshold::MASK_ON;

// tan(22.5 deg) in Q15
const TG22: i64 = 13573;

const NOT_EDGE: u8 = 0;
const WEAK: u8 = 1;
const STRONG: u8 = 2;

/// Compute the 3x3 Sobel derivatives of a grayscale image.
///
/// Out-of-bounds samples replicate the nearest border pixel.
///
/// # Returns
///
/// The `(dx, dy)` derivative buffers, row-major with one value per pixel.
pub fn sobel_3x3(src: &Image<u8, 1>) -> (Vec<i32>, Vec<i32>) {
    let width = src.width();
    let height = src.height();
    let mut dx = vec![0i32; width * height];
    let mut dy = vec![0i32; width * height];

    if src.is_empty() {
        return (dx, dy);
    }

    let data = src.as_slice();
    let at = |x: isize, y: isize| -> i32 {
        let x = x.clamp(0, width as isize - 1) as usize;
        let y = y.clamp(0, height as isize - 1) as usize;
        data[y * width + x] as i32
    };

    dx.par_chunks_exact_mut(width)
        .zip(dy.par_chunks_exact_mut(width))
        .enumerate()
        .for_each(|(y, (dx_row, dy_row))| {
            let y = y as isize;
            for x in 0..width {
                let xi = x as isize;
                let (tl, t, tr) = (at(xi - 1, y - 1), at(xi, y - 1), at(xi + 1, y - 1));
                let (l, r) = (at(xi - 1, y), at(xi + 1, y));
                let (bl, b, br) = (at(xi - 1, y + 1), at(xi, y + 1), at(xi + 1, y + 1));

                dx_row[x] = (tr + 2 * r + br) - (tl + 2 * l + bl);
                dy_row[x] = (bl + 2 * b + br) - (tl + 2 * t + tr);
            }
        });

    (dx, dy)
}

/// Detect edges in a grayscale image with the Canny algorithm.
///
/// The gradient comes from a 3x3 Sobel operator and its magnitude is the L1
/// norm `|dx| + |dy|`. Thin ridges are kept by non-maximum suppression along
/// the quantized gradient direction (magnitude outside the image reads as
/// zero). Pixels above `high_threshold` seed edges that grow through
/// 8-connected pixels above `low_threshold`.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output edge map, 255 on edges and 0 elsewhere.
/// * `low_threshold` - The hysteresis lower threshold.
/// * `high_threshold` - The hysteresis upper threshold.
///
/// # Example
///
/// ```
/// use verdant_image::{Image, ImageSize};
/// use verdant_imgproc::edges::canny;
///
/// let size = ImageSize { width: 8, height: 8 };
/// let flat = Image::<u8, 1>::from_size_val(size, 90).unwrap();
/// let mut edges = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// canny(&flat, &mut edges, 50.0, 150.0).unwrap();
/// assert!(edges.as_slice().iter().all(|&v| v == 0));
/// ```
pub fn canny(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    low_threshold: f32,
    high_threshold: f32,
) -> Result<(), ImageError> {
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

    let (low, high) = if low_threshold > high_threshold {
        (high_threshold, low_threshold)
    } else {
        (low_threshold, high_threshold)
    };

    let width = src.width();
    let height = src.height();

    let (dx, dy) = sobel_3x3(src);
    let mag: Vec<i32> = dx
        .par_iter()
        .zip(dy.par_iter())
        .map(|(gx, gy)| gx.abs() + gy.abs())
        .collect();

    let mag_at = |x: isize, y: isize| -> i32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            mag[y as usize * width + x as usize]
        }
    };

    // non-maximum suppression
    let mut state = vec![NOT_EDGE; width * height];
    state
        .par_chunks_exact_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, s) in row.iter_mut().enumerate() {
                let idx = y * width + x;
                let m = mag[idx];
                if (m as f32) <= low {
                    continue;
                }

                let (xs, ys) = (dx[idx] as i64, dy[idx] as i64);
                let (ax, ay) = (xs.abs(), ys.abs());
                let (xi, yi) = (x as isize, y as isize);

                let tg22x = ax * TG22;
                let ay15 = ay << 15;

                let is_max = if ay15 < tg22x {
                    m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
                } else {
                    let tg67x = tg22x + (ax << 16);
                    if ay15 > tg67x {
                        m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
                    } else {
                        let sign = if (xs ^ ys) < 0 { -1 } else { 1 };
                        m > mag_at(xi - sign, yi - 1) && m > mag_at(xi + sign, yi + 1)
                    }
                };

                if is_max {
                    *s = if (m as f32) > high { STRONG } else { WEAK };
                }
            }
        });

    // hysteresis
    let mut stack: Vec<usize> = state
        .iter()
        .enumerate()
        .filter(|(_, &s)| s == STRONG)
        .map(|(i, _)| i)
        .collect();

    while let Some(idx) = stack.pop() {
        let (x, y) = ((idx % width) as isize, (idx / width) as isize);
        for ny in (y - 1)..=(y + 1) {
            for nx in (x - 1)..=(x + 1) {
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let nidx = ny as usize * width + nx as usize;
                if state[nidx] == WEAK {
                    state[nidx] = STRONG;
                    stack.push(nidx);
                }
            }
        }
    }

    dst.as_slice_mut()
        .par_iter_mut()
        .zip(state.par_iter())
        .for_each(|(out, &s)| *out = if s == STRONG { MASK_ON } else { 0 });

    Ok(())
}
