//! SVG document writer
//!
//! Accumulates rectangles in memory and serializes them into a standalone
//! SVG 1.1 document with top-left origin and pixel units.
use crate::{ConvertError, Scalar, Size, utils::scalar_write};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Axis aligned filled rectangle produced for a single pixel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// Fill color as `[red, green, blue]`
    pub fill: [u8; 3],
    /// Opacity in `[0, 1]`, `None` means fully opaque
    pub opacity: Option<Scalar>,
}

impl PixelRect {
    pub fn write_svg<W: Write>(&self, mut out: W) -> io::Result<()> {
        let [r, g, b] = self.fill;
        write!(
            out,
            r#"<rect x="{}px" y="{}px" width="{}px" height="{}px" fill="rgb({},{},{})""#,
            self.x, self.y, self.width, self.height, r, g, b
        )?;
        if let Some(opacity) = self.opacity {
            out.write_all(br#" opacity=""#)?;
            scalar_write(&mut out, opacity)?;
            out.write_all(b"\"")?;
        }
        out.write_all(b" />\n")
    }
}

/// Vector document: canvas size plus rectangles in emission order
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    size: Size,
    rects: Vec<PixelRect>,
}

impl Document {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            rects: Vec::new(),
        }
    }

    /// Canvas size
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn add(&mut self, rect: PixelRect) -> &mut Self {
        self.rects.push(rect);
        self
    }

    pub fn rects(&self) -> &[PixelRect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Serialize document as SVG
    pub fn write_svg<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(b"<?xml version=\"1.0\" encoding=\"utf-8\" ?>\n")?;
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" baseProfile="full" width="{}px" height="{}px" viewBox="0 0 {} {}">"#,
            self.size.width, self.size.height, self.size.width, self.size.height,
        )?;
        for rect in self.rects.iter() {
            rect.write_svg(&mut out)?;
        }
        out.write_all(b"</svg>\n")
    }

    /// Save document to the `path`.
    ///
    /// Document is written to a temporary file next to `path` first and then renamed,
    /// so a failed save never leaves a truncated document behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConvertError> {
        let path = path.as_ref();
        let _span = tracing::debug_span!("[save]", path = %path.display()).entered();

        let mut buffer = Vec::new();
        self.write_svg(&mut buffer)
            .map_err(|source| write_error(path, source))?;

        let tmp = tmp_path(path);
        let result = fs::write(&tmp, &buffer).and_then(|_| fs::rename(&tmp, path));
        if let Err(source) = result {
            // ignore cleanup failure, the original error is more useful
            let _ = fs::remove_file(&tmp);
            return Err(write_error(path, source));
        }
        tracing::debug!("[save:bytes] {}", buffer.len());
        Ok(())
    }
}

fn write_error(path: &Path, source: io::Error) -> ConvertError {
    ConvertError::WriteError {
        path: path.to_path_buf(),
        source,
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
