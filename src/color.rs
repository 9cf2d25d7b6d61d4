use crate::Scalar;
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// sRGB color with straight (not pre-multiplied) alpha, one byte per channel.
///
/// Layout matches RGBA8 pixel buffers, so decoded image data can be viewed as
/// a slice of `RGBA` without copying individual channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct RGBA([u8; 4]);

impl RGBA {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub const fn red(self) -> u8 {
        self.0[0]
    }

    pub const fn green(self) -> u8 {
        self.0[1]
    }

    pub const fn blue(self) -> u8 {
        self.0[2]
    }

    pub const fn alpha(self) -> u8 {
        self.0[3]
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        self.0
    }

    /// Color components with alpha discarded
    pub const fn to_rgb(self) -> [u8; 3] {
        let [r, g, b, _] = self.0;
        [r, g, b]
    }

    /// Fully transparent pixels are not drawn at all
    pub const fn is_transparent(self) -> bool {
        self.alpha() == 0
    }

    /// Opacity in `[0, 1]`, `None` if the color is fully opaque.
    pub fn opacity(self) -> Option<Scalar> {
        match self.alpha() {
            255 => None,
            alpha => Some(alpha as Scalar / 255.0),
        }
    }
}

impl From<[u8; 4]> for RGBA {
    fn from(rgba: [u8; 4]) -> Self {
        Self(rgba)
    }
}

impl fmt::Display for RGBA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)?;
        if a != 255 {
            write!(f, "{:02x}", a)?;
        }
        Ok(())
    }
}
