use std::fmt;

use crate::error::ImageError;

/// Width and height of an image, in pixels.
///
/// ```
/// use verdant_image::ImageSize;
///
/// let size = ImageSize::from([640, 480]);
/// assert_eq!(size.area(), 307_200);
/// assert_eq!(size.to_string(), "640x480");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from([width, height]: [usize; 2]) -> Self {
        Self { width, height }
    }
}

/// An owned image with `CHANNELS` interleaved samples per pixel.
///
/// Samples are stored row-major: channel `c` of pixel `(x, y)` lives at
/// `(y * width + x) * CHANNELS + c`. Images with zero width or height are
/// allowed; callers that need pixels check [`Image::is_empty`].
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Wrap `data` as an image of `size`.
    ///
    /// Fails with [`ImageError::InvalidChannelShape`] unless `data` holds
    /// exactly `width * height * CHANNELS` samples.
    ///
    /// ```
    /// use verdant_image::{Image, ImageError, ImageSize};
    ///
    /// let size = ImageSize { width: 2, height: 1 };
    /// let image = Image::<u8, 3>::new(size, vec![0; 6]).unwrap();
    /// assert_eq!(image.num_channels(), 3);
    ///
    /// let short = Image::<u8, 3>::new(size, vec![0; 5]);
    /// assert_eq!(short, Err(ImageError::InvalidChannelShape(5, 6)));
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.area() * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }
        Ok(Self { size, data })
    }

    /// An image of `size` with every sample set to `val`.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Self::new(size, vec![val; size.area() * CHANNELS])
    }

    /// The image size.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Alias of [`Image::width`].
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Alias of [`Image::height`].
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Samples per pixel.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Whether the image holds no pixel at all.
    pub fn is_empty(&self) -> bool {
        self.size.area() == 0
    }

    /// All samples, row-major and interleaved.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// All samples, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    fn index_of(&self, x: usize, y: usize, ch: usize) -> Result<usize, ImageError> {
        let (width, height) = (self.size.width, self.size.height);
        if x >= width || y >= height {
            return Err(ImageError::PixelIndexOutOfBounds(x, y, width, height));
        }
        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }
        Ok((y * width + x) * CHANNELS + ch)
    }

    /// Sample `ch` of pixel `(x, y)`.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<&T, ImageError> {
        self.index_of(x, y, ch).map(|idx| &self.data[idx])
    }

    /// Overwrite sample `ch` of pixel `(x, y)`.
    pub fn set_pixel(&mut self, x: usize, y: usize, ch: usize, val: T) -> Result<(), ImageError> {
        let idx = self.index_of(x, y, ch)?;
        self.data[idx] = val;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_display() {
        let size = ImageSize {
            width: 12,
            height: 7,
        };
        assert_eq!(size.area(), 84);
        assert_eq!(format!("{size}"), "12x7");
        assert_eq!(ImageSize::from([12, 7]), size);
    }

    #[test]
    fn dimensions() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 12,
                height: 7,
            },
            9,
        )?;
        assert_eq!((image.width(), image.height()), (12, 7));
        assert_eq!((image.cols(), image.rows()), (12, 7));
        assert_eq!(image.as_slice().len(), 12 * 7 * 3);
        assert!(!image.is_empty());
        Ok(())
    }

    #[test]
    fn image_wrong_length() {
        let res = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0u8; 11],
        );
        assert_eq!(res, Err(ImageError::InvalidChannelShape(11, 12)));
    }

    #[test]
    fn image_zero_area() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 0,
                height: 5,
            },
            vec![],
        )?;
        assert!(image.is_empty());
        Ok(())
    }

    #[test]
    fn image_get_set_pixel() -> Result<(), ImageError> {
        let mut image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 3,
            },
            0,
        )?;
        image.set_pixel(1, 2, 1, 200)?;
        assert_eq!(image.get_pixel(1, 2, 1)?, &200);
        assert_eq!(image.as_slice()[(2 * 2 + 1) * 3 + 1], 200);

        assert_eq!(
            image.get_pixel(2, 0, 0),
            Err(ImageError::PixelIndexOutOfBounds(2, 0, 2, 3))
        );
        assert_eq!(
            image.get_pixel(0, 0, 3),
            Err(ImageError::ChannelIndexOutOfBounds(3, 3))
        );

        Ok(())
    }
}
