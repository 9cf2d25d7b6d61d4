use crate::{ConvertError, Malformed, RGBA};

/// Size of an image or a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    /// Number of cells (pixels) covered by this size, `None` on overflow.
    pub fn area(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

/// Row-major layout of pixels inside of a flat buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Width of the image
    pub width: usize,
    /// Height of the image
    pub height: usize,
}

impl Shape {
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Position `(row, col)` of the `n`-th pixel in row-major order
    #[inline]
    pub fn nth(&self, n: usize) -> Option<(usize, usize)> {
        if self.width == 0 {
            return None;
        }
        let row = n / self.width;
        let col = n - row * self.width;
        (row < self.height).then_some((row, col))
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

pub trait Image {
    type Pixel;

    fn data(&self) -> &[Self::Pixel];

    fn shape(&self) -> Shape;

    fn width(&self) -> usize {
        self.shape().width
    }

    fn height(&self) -> usize {
        self.shape().height
    }

    fn get(&self, row: usize, col: usize) -> Option<&Self::Pixel> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        self.data().get(self.shape().offset(row, col))
    }

    fn as_ref(&self) -> ImageRef<'_, Self::Pixel> {
        ImageRef {
            shape: self.shape(),
            data: self.data(),
        }
    }

    /// Iterate over pixels in row-major order
    fn iter(&self) -> ImageIter<'_, Self::Pixel> {
        ImageIter {
            index: 0,
            shape: self.shape(),
            data: self.data(),
        }
    }
}

pub struct ImageIter<'a, P> {
    index: usize,
    shape: Shape,
    data: &'a [P],
}

impl<P> ImageIter<'_, P> {
    /// Position `(row, col)` of the pixel that will be returned next
    pub fn position(&self) -> (usize, usize) {
        self.shape.nth(self.index).unwrap_or((self.shape.height, 0))
    }
}

impl<'a, P> Iterator for ImageIter<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<Self::Item> {
        self.nth(0)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.index += n + 1;
        let (row, col) = self.shape.nth(self.index - 1)?;
        self.data.get(self.shape.offset(row, col))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageOwned<P> {
    shape: Shape,
    data: Vec<P>,
}

impl<P> ImageOwned<P> {
    /// Create image from row-major pixels, fails if pixel count is not `width * height`.
    pub fn new(shape: Shape, data: Vec<P>) -> Result<Self, Malformed> {
        let expected = shape.size().area().ok_or(Malformed::PixelCount {
            expected: usize::MAX,
            found: data.len(),
        })?;
        if expected != data.len() {
            return Err(Malformed::PixelCount {
                expected,
                found: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn new_with<F>(height: usize, width: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> P,
    {
        let mut data = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col))
            }
        }
        Self {
            shape: Shape { width, height },
            data,
        }
    }
}

impl<P> Image for ImageOwned<P> {
    type Pixel = P;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn data(&self) -> &[Self::Pixel] {
        &self.data
    }
}

/// Borrowed view of row-major pixels.
///
/// Unlike [`ImageOwned::new`] this does not validate the pixel count, conversion
/// checks it before reading any pixel.
#[derive(Clone)]
pub struct ImageRef<'a, P> {
    shape: Shape,
    data: &'a [P],
}

impl<'a, P> ImageRef<'a, P> {
    pub fn new(shape: Shape, data: &'a [P]) -> Self {
        Self { shape, data }
    }
}

impl<P> Image for ImageRef<'_, P> {
    type Pixel = P;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn data(&self) -> &[Self::Pixel] {
        self.data
    }
}

impl<I> Image for &I
where
    I: Image + ?Sized,
{
    type Pixel = I::Pixel;

    fn shape(&self) -> Shape {
        (*self).shape()
    }

    fn data(&self) -> &[Self::Pixel] {
        (*self).data()
    }
}

/// Decoded image ready for conversion
pub type SourceImage = ImageOwned<RGBA>;

impl ImageOwned<RGBA> {
    /// Build image from interleaved 8-bit channels.
    ///
    /// Four channels are interpreted as RGBA, three as RGB with an opaque alpha.
    /// Layouts without all three color channels are rejected.
    pub fn from_raw(
        width: usize,
        height: usize,
        channels: usize,
        bytes: &[u8],
    ) -> Result<Self, ConvertError> {
        if !matches!(channels, 3 | 4) {
            return Err(Malformed::Channels(channels).into());
        }
        let expected = width
            .checked_mul(height)
            .and_then(|area| area.checked_mul(channels))
            .ok_or(Malformed::BufferLength {
                expected: usize::MAX,
                found: bytes.len(),
            })?;
        if expected != bytes.len() {
            return Err(Malformed::BufferLength {
                expected,
                found: bytes.len(),
            }
            .into());
        }
        let data = if channels == 4 {
            bytemuck::try_cast_slice::<u8, RGBA>(bytes)
                .map_err(|_| Malformed::Channels(channels))?
                .to_vec()
        } else {
            bytes
                .chunks_exact(3)
                .map(|rgb| RGBA::from([rgb[0], rgb[1], rgb[2], 255]))
                .collect()
        };
        Ok(Self::new(Shape { width, height }, data)?)
    }
}
