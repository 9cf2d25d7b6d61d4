//! Image decoding
//!
//! Any format supported by the `image` crate is accepted, format is detected from
//! the file content rather than its extension.
use crate::{ConvertError, Image, SourceImage};
use image::{DynamicImage, ImageError, ImageReader};
use std::{io, path::Path};

/// Load image from the file and normalize it to RGBA pixels
pub fn load(path: impl AsRef<Path>) -> Result<SourceImage, ConvertError> {
    let path = path.as_ref();
    let _span = tracing::debug_span!("[decode]", path = %path.display()).entered();
    tracing::info!("Reading image file '{}'", path.display());

    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|error| io_error(path, error))?;
    let image = reader.decode().map_err(|error| match error {
        ImageError::IoError(error) => io_error(path, error),
        error => ConvertError::Decode(error),
    })?;
    let image = from_dynamic(image)?;

    tracing::info!("Image is {}x{}", image.width(), image.height());
    tracing::info!("Read {} pixels", image.data().len());
    Ok(image)
}

/// Convert decoded image into RGBA pixels
pub fn from_dynamic(image: DynamicImage) -> Result<SourceImage, ConvertError> {
    let (width, height) = (image.width() as usize, image.height() as usize);
    match image {
        DynamicImage::ImageRgba8(rgba) => SourceImage::from_raw(width, height, 4, rgba.as_raw()),
        DynamicImage::ImageRgb8(rgb) => SourceImage::from_raw(width, height, 3, rgb.as_raw()),
        image => {
            tracing::info!("Converting image to RGBA");
            SourceImage::from_raw(width, height, 4, image.to_rgba8().as_raw())
        }
    }
}

fn io_error(path: &Path, error: io::Error) -> ConvertError {
    if error.kind() == io::ErrorKind::NotFound {
        ConvertError::FileNotFound(path.to_path_buf())
    } else {
        ConvertError::Decode(ImageError::IoError(error))
    }
}
