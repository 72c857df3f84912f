/// Failures of image construction and pixel access.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// The buffer length does not match the image size.
    #[error("buffer of {0} samples does not fit an image of {1} samples")]
    InvalidChannelShape(usize, usize),

    /// Two images that must share a size do not.
    #[error("size mismatch: {0}x{1} vs {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// The pixel coordinates lie outside the image.
    #[error("pixel ({0}, {1}) is outside the {2}x{3} image")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// The channel index exceeds the channel count.
    #[error("channel {0} does not exist in a {1} channel image")]
    ChannelIndexOutOfBounds(usize, usize),
}
