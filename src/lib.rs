//! Convert pixel art into scalable vector graphics.
//!
//! Every visible pixel of the source image becomes a square `<rect>` element:
//!  - fully transparent pixels are skipped
//!  - semi-transparent pixels carry an `opacity` attribute
//!  - optional one unit overlap hides seams produced by anti-aliasing renderers
//!
#![deny(warnings)]

mod color;
mod convert;
mod decode;
mod error;
mod image;
mod svg;
mod utils;

pub use crate::image::{Image, ImageIter, ImageOwned, ImageRef, Shape, Size, SourceImage};
pub use color::RGBA;
pub use convert::{ConvertOptions, DEFAULT_SQUARE_SIZE, convert};
pub use decode::{from_dynamic, load};
pub use error::{ConvertError, Malformed};
pub use svg::{Document, PixelRect};
pub use utils::{EPSILON, Scalar, scalar_write};
