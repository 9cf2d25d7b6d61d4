use std::{fmt, io, path::PathBuf};

/// Reason why pixel data can not be interpreted as an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// Pixel count does not match `width * height`
    PixelCount { expected: usize, found: usize },
    /// Raw buffer length does not match `width * height * channels`
    BufferLength { expected: usize, found: usize },
    /// Channel layout lacks color channels (or is not a known layout at all)
    Channels(usize),
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Malformed::PixelCount { expected, found } => {
                write!(f, "expected {} pixels, found {}", expected, found)
            }
            Malformed::BufferLength { expected, found } => {
                write!(f, "expected {} bytes of pixel data, found {}", expected, found)
            }
            Malformed::Channels(channels) => {
                write!(f, "unsupported pixel layout with {} channel(s)", channels)
            }
        }
    }
}

/// Error produced while converting pixel art into a vector document
#[derive(Debug)]
pub enum ConvertError {
    /// Input image does not exist
    FileNotFound(PathBuf),
    /// Input could not be read or is not a recognized image format
    Decode(image::ImageError),
    /// Square size is not positive, or the canvas would not fit into `usize`
    InvalidDimension(i64),
    /// Decoded pixel data is inconsistent with the image dimensions
    MalformedImage(Malformed),
    /// Output document could not be written
    WriteError { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::FileNotFound(path) => {
                write!(f, "image file '{}' not found", path.display())
            }
            ConvertError::Decode(error) => write!(f, "failed to decode image: {}", error),
            ConvertError::InvalidDimension(size) => {
                write!(f, "invalid square size {}, must be a positive integer", size)
            }
            ConvertError::MalformedImage(reason) => write!(f, "malformed image: {}", reason),
            ConvertError::WriteError { path, source } => {
                write!(f, "failed to write '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Decode(error) => Some(error),
            ConvertError::WriteError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<Malformed> for ConvertError {
    fn from(reason: Malformed) -> Self {
        Self::MalformedImage(reason)
    }
}

impl From<image::ImageError> for ConvertError {
    fn from(error: image::ImageError) -> Self {
        Self::Decode(error)
    }
}
