use std::path::PathBuf;

/// Failures while reading or writing image files.
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    /// The input path does not exist.
    #[error("no such file: {0}")]
    FileDoesNotExist(PathBuf),

    /// Opening, mapping or creating a file failed.
    #[error("file access failed: {0}")]
    FileError(#[from] std::io::Error),

    /// The decoded pixels do not form a valid image.
    #[error("invalid pixel buffer: {0}")]
    ImageCreationError(#[from] verdant_image::ImageError),

    /// The content is not a raster format we can decode.
    #[error("cannot decode image: {0}")]
    ImageDecodeError(#[from] image::ImageError),

    /// The png encoder rejected the data.
    #[error("cannot encode png: {0}")]
    PngEncodingError(String),
}
