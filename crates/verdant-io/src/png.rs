use std::{fs::File, path::Path};

use png::{BitDepth, ColorType, Encoder};
use verdant_image::{Image, ImageSize};
use verdant_imgproc::color::rgb_from_bgr;

use crate::error::IoError;

/// Writes the given single channel image as an 8-bit grayscale PNG.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image to encode.
pub fn write_image_png_gray8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    write_png_impl(
        file_path,
        image.as_slice(),
        image.size(),
        ColorType::Grayscale,
    )
}

/// Writes the given BGR8 image as an 8-bit RGB PNG.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The BGR image to encode.
pub fn write_image_png_bgr8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    let mut rgb = Image::<u8, 3>::from_size_val(image.size(), 0)?;
    rgb_from_bgr(image, &mut rgb)?;

    write_png_impl(file_path, rgb.as_slice(), rgb.size(), ColorType::Rgb)
}

fn write_png_impl(
    file_path: impl AsRef<Path>,
    image_data: &[u8],
    image_size: ImageSize,
    color_type: ColorType,
) -> Result<(), IoError> {
    let file = File::create(file_path)?;

    let mut encoder = Encoder::new(file, image_size.width as u32, image_size.height as u32);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image_data)
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    Ok(())
}
