use std::cmp::{max, min};

use verdant_image::{Image, ImageError};

use crate::parallel;

/// Width of a glyph cell in font pixels, including one column of spacing.
pub const GLYPH_ADVANCE: usize = 6;

/// Height of a glyph in font pixels.
pub const GLYPH_HEIGHT: usize = 7;

/// Helper function to set a pixel's color, handling bounds checking.
#[inline]
fn set_pixel<const C: usize>(img: &mut Image<u8, C>, x: i64, y: i64, color: [u8; C]) {
    if x >= 0 && x < img.cols() as i64 && y >= 0 && y < img.rows() as i64 {
        let start = (y as usize * img.cols() + x as usize) * C;
        img.as_slice_mut()[start..start + C].copy_from_slice(&color);
    }
}

/// Blend two images as `dst = src1 * alpha + src2 * beta + gamma`.
///
/// The result is rounded to the nearest integer and saturated to `[0, 255]`.
///
/// # Arguments
///
/// * `src1` - The first input image.
/// * `alpha` - Weight of the first image.
/// * `src2` - The second input image.
/// * `beta` - Weight of the second image.
/// * `gamma` - Scalar added to each sum.
/// * `dst` - The output image.
///
/// # Example
///
/// ```
/// use verdant_image::{Image, ImageSize};
/// use verdant_imgproc::draw::add_weighted;
///
/// let size = ImageSize { width: 1, height: 1 };
/// let a = Image::<u8, 3>::new(size, vec![100, 100, 100]).unwrap();
/// let b = Image::<u8, 3>::new(size, vec![0, 255, 0]).unwrap();
/// let mut out = Image::<u8, 3>::from_size_val(size, 0).unwrap();
///
/// add_weighted(&a, 0.4, &b, 0.6, 0.0, &mut out).unwrap();
/// assert_eq!(out.as_slice(), &[40, 193, 40]);
/// ```
pub fn add_weighted<const C: usize>(
    src1: &Image<u8, C>,
    alpha: f32,
    src2: &Image<u8, C>,
    beta: f32,
    gamma: f32,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.width(),
            src1.height(),
            src2.width(),
            src2.height(),
        ));
    }

    if src1.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src1.width(),
            src1.height(),
            dst.width(),
            dst.height(),
        ));
    }

    parallel::par_iter_rows_val_two(src1, src2, dst, |a, b, out| {
        let v = *a as f32 * alpha + *b as f32 * beta + gamma;
        *out = v.round().clamp(0.0, 255.0) as u8;
    });

    Ok(())
}

/// Draws a filled rectangle on an image inplace.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `top_left` - The top-left corner coordinates (x, y), inclusive.
/// * `bottom_right` - The bottom-right corner coordinates (x, y), exclusive.
/// * `color` - The fill color of the rectangle.
pub fn draw_filled_rect<const C: usize>(
    img: &mut Image<u8, C>,
    top_left: (i64, i64),
    bottom_right: (i64, i64),
    color: [u8; C],
) {
    let (x_start, y_start) = top_left;
    let (x_end, y_end) = bottom_right;

    // clamp coordinates to image bounds
    let x_min = max(0, min(x_start, x_end));
    let y_min = max(0, min(y_start, y_end));
    let x_max = min(img.cols() as i64, max(x_start, x_end));
    let y_max = min(img.rows() as i64, max(y_start, y_end));

    for y in y_min..y_max {
        for x in x_min..x_max {
            set_pixel(img, x, y, color);
        }
    }
}

/// Size in pixels `(width, height)` of `text` rendered by [`draw_text`].
pub fn text_size(text: &str, scale: usize) -> (usize, usize) {
    (
        text.chars().count() * GLYPH_ADVANCE * scale,
        GLYPH_HEIGHT * scale,
    )
}

/// Draws a line of text on an image inplace with the built-in 5x7 font.
///
/// Letters are drawn as capitals; characters without a glyph leave a blank
/// cell. Pixels falling outside the image are clipped.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `text` - The text to render.
/// * `origin` - The bottom-left corner of the text (x, y), like a baseline.
/// * `color` - The color of the glyphs.
/// * `scale` - The integer size of one font pixel.
pub fn draw_text<const C: usize>(
    img: &mut Image<u8, C>,
    text: &str,
    origin: (i64, i64),
    color: [u8; C],
    scale: usize,
) {
    let scale = scale as i64;
    let top = origin.1 - GLYPH_HEIGHT as i64 * scale;

    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else {
            continue;
        };
        let left = origin.0 + (i * GLYPH_ADVANCE) as i64 * scale;

        for (gy, bits) in rows.iter().enumerate() {
            for gx in 0..5 {
                if bits & (0x10 >> gx) == 0 {
                    continue;
                }
                let x0 = left + gx as i64 * scale;
                let y0 = top + gy as i64 * scale;
                draw_filled_rect(img, (x0, y0), (x0 + scale, y0 + scale), color);
            }
        }
    }
}

/// Rows of a 5x7 glyph, most significant of the low 5 bits on the left.
fn glyph(ch: char) -> Option<[u8; GLYPH_HEIGHT]> {
    let rows = match ch.to_ascii_uppercase() {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '%' => [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        _ => return None,
    };
    Some(rows)
}
