use std::path::Path;

use serde::{Deserialize, Serialize};
use verdant_image::{Image, ImageError, ImageSize};
use verdant_imgproc::color::bgr_from_rgb;

use crate::error::IoError;

/// Channel layout of a raw 8-bit pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    /// blue, green, red
    Bgr8,
    /// red, green, blue
    Rgb8,
    /// blue, green, red, alpha
    Bgra8,
    /// red, green, blue, alpha
    Rgba8,
    /// single luma channel
    Gray8,
}

impl PixelFormat {
    /// Number of interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Bgr8 | PixelFormat::Rgb8 => 3,
            PixelFormat::Bgra8 | PixelFormat::Rgba8 => 4,
            PixelFormat::Gray8 => 1,
        }
    }
}

/// Reads an image from the given file path as 8-bit BGR.
///
/// The method tries to read from any image format supported by the image crate.
/// Gray images are replicated across the three channels, alpha is dropped
/// and 16-bit or float samples are reduced to 8 bits.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Errors
///
/// [`IoError::FileDoesNotExist`] when the path is missing and
/// [`IoError::ImageDecodeError`] when the content is not a supported raster.
pub fn read_image_bgr8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    decode_image_bgr8(&mmap)
}

/// Decodes an encoded image held in memory as 8-bit BGR.
///
/// The format is guessed from the content, so the bytes of an uploaded
/// file can be passed as-is.
///
/// # Arguments
///
/// * `bytes` - The encoded image (PNG, JPEG, BMP, TIFF or WebP).
///
/// # Example
///
/// ```
/// use verdant_io::functional::decode_image_bgr8;
/// use verdant_io::IoError;
///
/// let res = decode_image_bgr8(b"definitely not an image");
/// assert!(matches!(res, Err(IoError::ImageDecodeError(_))));
/// ```
pub fn decode_image_bgr8(bytes: &[u8]) -> Result<Image<u8, 3>, IoError> {
    let img = image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!("decoded {:?} image of {}", img.color(), size);

    let rgb = Image::<u8, 3>::new(size, img.into_rgb8().into_raw())?;
    let mut bgr = Image::<u8, 3>::from_size_val(size, 0)?;
    bgr_from_rgb(&rgb, &mut bgr)?;

    Ok(bgr)
}

/// Builds a BGR8 image from an already decoded pixel buffer.
///
/// # Arguments
///
/// * `size` - The size of the image in pixels.
/// * `data` - Interleaved samples laid out as described by `format`.
/// * `format` - The channel order of `data`.
///
/// # Errors
///
/// [`IoError::ImageCreationError`] when `data` does not hold exactly
/// `width * height * channels` samples.
///
/// # Example
///
/// ```
/// use verdant_image::ImageSize;
/// use verdant_io::functional::{image_from_raw, PixelFormat};
///
/// let size = ImageSize { width: 1, height: 1 };
/// let bgr = image_from_raw(size, &[10, 20, 30, 255], PixelFormat::Rgba8).unwrap();
/// assert_eq!(bgr.as_slice(), &[30, 20, 10]);
/// ```
pub fn image_from_raw(
    size: ImageSize,
    data: &[u8],
    format: PixelFormat,
) -> Result<Image<u8, 3>, IoError> {
    let channels = format.channels();
    if data.len() != size.area() * channels {
        return Err(ImageError::InvalidChannelShape(data.len(), size.area() * channels).into());
    }

    let bgr: Vec<u8> = match format {
        PixelFormat::Bgr8 => data.to_vec(),
        PixelFormat::Bgra8 => data
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect(),
        PixelFormat::Rgb8 | PixelFormat::Rgba8 => data
            .chunks_exact(channels)
            .flat_map(|p| [p[2], p[1], p[0]])
            .collect(),
        PixelFormat::Gray8 => data.iter().flat_map(|&v| [v, v, v]).collect(),
    };

    Ok(Image::new(size, bgr)?)
}
