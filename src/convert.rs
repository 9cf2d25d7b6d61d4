//! Pixel to rectangle conversion
use crate::{ConvertError, Document, Image, Malformed, PixelRect, RGBA, Size};

/// Default side length of a single pixel square
pub const DEFAULT_SQUARE_SIZE: u32 = 40;

/// Options controlling how pixels are mapped to rectangles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Side length of each pixel square in output units, must be positive
    pub square_size: u32,
    /// Widen every square by one unit to hide seams between neighbours
    pub overlap: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            square_size: DEFAULT_SQUARE_SIZE,
            overlap: false,
        }
    }
}

impl ConvertOptions {
    pub fn new(square_size: u32, overlap: bool) -> Self {
        Self {
            square_size,
            overlap,
        }
    }

    /// Width and height of each emitted rectangle
    pub fn rect_size(&self) -> usize {
        self.square_size as usize + usize::from(self.overlap)
    }
}

/// Convert image into a vector document with one rectangle per visible pixel.
///
/// Rectangles are emitted in row-major order, fully transparent pixels are skipped
/// but still contribute to the canvas size.
pub fn convert<I>(image: I, options: ConvertOptions) -> Result<Document, ConvertError>
where
    I: Image<Pixel = RGBA>,
{
    if options.square_size == 0 {
        return Err(ConvertError::InvalidDimension(0));
    }
    let square = options.square_size as usize;
    let shape = image.shape();
    let canvas = match (
        shape.width.checked_mul(square),
        shape.height.checked_mul(square),
    ) {
        (Some(width), Some(height)) => Size { width, height },
        _ => return Err(ConvertError::InvalidDimension(options.square_size.into())),
    };

    let data = image.data();
    let expected = shape.size().area().ok_or(Malformed::PixelCount {
        expected: usize::MAX,
        found: data.len(),
    })?;
    if data.len() != expected {
        return Err(Malformed::PixelCount {
            expected,
            found: data.len(),
        }
        .into());
    }

    let _span = tracing::debug_span!("[convert]", width = shape.width, height = shape.height)
        .entered();
    let rect_size = options.rect_size();
    let mut doc = Document::new(canvas);
    for row in 0..shape.height {
        tracing::info!("Processing pixel row {} of {}", row + 1, shape.height);
        let pixels = &data[shape.offset(row, 0)..shape.offset(row + 1, 0)];
        for (col, pixel) in pixels.iter().enumerate() {
            if pixel.is_transparent() {
                continue;
            }
            doc.add(PixelRect {
                x: col * square,
                y: row * square,
                width: rect_size,
                height: rect_size,
                fill: pixel.to_rgb(),
                opacity: pixel.opacity(),
            });
        }
    }
    tracing::debug!("[convert:rects] {}", doc.len());
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ImageOwned, ImageRef, Shape, SourceImage, assert_approx_eq};

    fn scenario() -> SourceImage {
        let pixels = vec![
            RGBA::new(255, 0, 0, 255),
            RGBA::new(0, 255, 0, 0),
            RGBA::new(0, 0, 255, 128),
            RGBA::new(255, 255, 255, 255),
        ];
        ImageOwned::new(
            Shape {
                width: 2,
                height: 2,
            },
            pixels,
        )
        .unwrap()
    }

    /// Deterministic pseudo random image with every alpha class present
    fn noise(width: usize, height: usize) -> SourceImage {
        let mut state: u32 = 0x2545_f491;
        ImageOwned::new_with(height, width, |_, _| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let [r, g, b, a] = state.to_le_bytes();
            let a = match a % 3 {
                0 => 0,
                1 => 255,
                _ => a,
            };
            RGBA::new(r, g, b, a)
        })
    }

    #[test]
    fn test_scenario() -> Result<(), ConvertError> {
        let doc = convert(&scenario(), ConvertOptions::new(10, false))?;
        assert_eq!(
            doc.size(),
            Size {
                width: 20,
                height: 20
            }
        );
        let rects = doc.rects();
        assert_eq!(rects.len(), 3);

        assert_eq!((rects[0].x, rects[0].y), (0, 0));
        assert_eq!((rects[0].width, rects[0].height), (10, 10));
        assert_eq!(rects[0].fill, [255, 0, 0]);
        assert_eq!(rects[0].opacity, None);

        assert_eq!((rects[1].x, rects[1].y), (0, 10));
        assert_eq!((rects[1].width, rects[1].height), (10, 10));
        assert_eq!(rects[1].fill, [0, 0, 255]);
        assert_approx_eq!(rects[1].opacity.unwrap(), 0.502, 1e-3);

        assert_eq!((rects[2].x, rects[2].y), (10, 10));
        assert_eq!(rects[2].fill, [255, 255, 255]);
        assert_eq!(rects[2].opacity, None);
        Ok(())
    }

    #[test]
    fn test_zero_square_size() {
        let result = convert(&scenario(), ConvertOptions::new(0, false));
        assert!(matches!(result, Err(ConvertError::InvalidDimension(0))));
    }

    #[test]
    fn test_canvas_overflow() {
        let pixels = [RGBA::default()];
        let image = ImageRef::new(
            Shape {
                width: usize::MAX / 2,
                height: 1,
            },
            &pixels,
        );
        let result = convert(image, ConvertOptions::new(3, false));
        assert!(matches!(result, Err(ConvertError::InvalidDimension(3))));
    }

    #[test]
    fn test_pixel_count_mismatch() {
        let pixels = [RGBA::new(1, 2, 3, 255); 5];
        let image = ImageRef::new(
            Shape {
                width: 3,
                height: 2,
            },
            &pixels,
        );
        let result = convert(image, ConvertOptions::default());
        assert!(matches!(
            result,
            Err(ConvertError::MalformedImage(Malformed::PixelCount {
                expected: 6,
                found: 5
            }))
        ));
    }

    #[test]
    fn test_all_opaque() -> Result<(), ConvertError> {
        let image = ImageOwned::new_with(3, 5, |row, col| RGBA::new(row as u8, col as u8, 7, 255));
        let doc = convert(&image, ConvertOptions::new(4, false))?;
        assert_eq!(doc.len(), 15);
        assert!(doc.rects().iter().all(|rect| rect.opacity.is_none()));
        for (index, rect) in doc.rects().iter().enumerate() {
            let (row, col) = (index / 5, index % 5);
            assert_eq!((rect.x, rect.y), (col * 4, row * 4));
            assert_eq!(rect.fill, [row as u8, col as u8, 7]);
        }
        Ok(())
    }

    #[test]
    fn test_all_transparent() -> Result<(), ConvertError> {
        let image = ImageOwned::new_with(3, 7, |_, _| RGBA::new(255, 255, 255, 0));
        let doc = convert(&image, ConvertOptions::new(6, true))?;
        assert!(doc.is_empty());
        assert_eq!(
            doc.size(),
            Size {
                width: 42,
                height: 18
            }
        );
        Ok(())
    }

    #[test]
    fn test_empty_image() -> Result<(), ConvertError> {
        let image = ImageOwned::new_with(0, 0, |_, _| RGBA::default());
        let doc = convert(&image, ConvertOptions::default())?;
        assert!(doc.is_empty());
        assert_eq!(doc.size(), Size::default());
        Ok(())
    }

    #[test]
    fn test_overlap() -> Result<(), ConvertError> {
        let image = noise(9, 7);
        let plain = convert(&image, ConvertOptions::new(12, false))?;
        let overlap = convert(&image, ConvertOptions::new(12, true))?;
        assert_eq!(plain.size(), overlap.size());
        assert_eq!(plain.len(), overlap.len());
        for (p, o) in plain.rects().iter().zip(overlap.rects()) {
            assert_eq!((p.x, p.y), (o.x, o.y));
            assert_eq!(o.width, p.width + 1);
            assert_eq!(o.height, p.height + 1);
            assert_eq!(p.width, 12);
        }
        Ok(())
    }

    #[test]
    fn test_row_major_order() -> Result<(), ConvertError> {
        let image = noise(11, 13);
        let doc = convert(&image, ConvertOptions::new(2, false))?;
        let visible = image.iter().filter(|pixel| !pixel.is_transparent()).count();
        assert_eq!(doc.len(), visible);
        for pair in doc.rects().windows(2) {
            assert!((pair[0].y, pair[0].x) < (pair[1].y, pair[1].x));
        }
        Ok(())
    }

    #[test]
    fn test_opacity_mapping() -> Result<(), ConvertError> {
        let image = ImageOwned::new_with(1, 3, |_, col| RGBA::new(0, 0, 0, [128, 1, 254][col]));
        let doc = convert(&image, ConvertOptions::new(1, false))?;
        let opacity: Vec<_> = doc.rects().iter().map(|rect| rect.opacity.unwrap()).collect();
        assert_approx_eq!(opacity[0], 128.0 / 255.0, 1e-9);
        assert_approx_eq!(opacity[1], 1.0 / 255.0, 1e-9);
        assert_approx_eq!(opacity[2], 254.0 / 255.0, 1e-9);
        Ok(())
    }

    #[test]
    fn test_idempotent() -> Result<(), ConvertError> {
        let image = noise(16, 16);
        let options = ConvertOptions::new(5, true);
        let mut first = Vec::new();
        let mut second = Vec::new();
        convert(&image, options)?.write_svg(&mut first).unwrap();
        convert(&image, options)?.write_svg(&mut second).unwrap();
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert_eq!(options.square_size, 40);
        assert!(!options.overlap);
        assert_eq!(options.rect_size(), 40);
        assert_eq!(ConvertOptions::new(40, true).rect_size(), 41);
    }
}
