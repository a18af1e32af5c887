//! Pick color encoding.
//!
//! Every pickable object is drawn into the pick target with a color that is
//! unique to it. Pixels read back from the target are packed into a single
//! `u32` so they can be compared and deduplicated cheaply.

use serde::{Deserialize, Serialize};

/// An RGBA pick color packed into 32 bits.
///
/// The layout is fixed regardless of platform endianness:
/// - bits 0-7: red
/// - bits 8-15: green
/// - bits 16-23: blue
/// - bits 24-31: alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedColor(pub u32);

impl PackedColor {
    /// The color the pick target is cleared to (transparent black).
    pub const BACKGROUND: Self = Self(0);

    /// Packs four channel bytes into a color.
    #[must_use]
    pub const fn pack(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((r as u32) | ((g as u32) << 8) | ((b as u32) << 16) | ((a as u32) << 24))
    }

    /// Packs an RGBA byte quadruple as laid out in a pixel buffer.
    #[must_use]
    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::pack(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Splits the color back into `[r, g, b, a]` bytes.
    #[must_use]
    pub const fn unpack(self) -> [u8; 4] {
        [
            (self.0 & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 24) & 0xFF) as u8,
        ]
    }

    /// Returns the color as normalized floats, suitable for shader uniforms
    /// or a render pass clear value.
    #[must_use]
    pub fn to_unorm(self) -> [f32; 4] {
        self.unpack().map(|c| f32::from(c) / 255.0)
    }

    /// Returns the raw packed value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl From<[u8; 4]> for PackedColor {
    fn from(rgba: [u8; 4]) -> Self {
        Self::from_rgba(rgba)
    }
}

impl From<PackedColor> for [u8; 4] {
    fn from(color: PackedColor) -> Self {
        color.unpack()
    }
}

/// Largest identifier [`index_to_color`] can encode without losing bits.
pub const MAX_PICK_INDEX: u32 = 0xFF_FFFF;

/// Encodes a pick identifier as an opaque color.
///
/// The low 24 bits of `index` go into RGB, so indices above
/// [`MAX_PICK_INDEX`] alias smaller ones:
/// - R contains bits 0-7
/// - G contains bits 8-15
/// - B contains bits 16-23
///
/// Alpha is always 255 so that no identifier collides with [`PackedColor::BACKGROUND`].
#[must_use]
pub fn index_to_color(index: u32) -> PackedColor {
    PackedColor::pack(
        (index & 0xFF) as u8,
        ((index >> 8) & 0xFF) as u8,
        ((index >> 16) & 0xFF) as u8,
        0xFF,
    )
}

/// Decodes a color produced by [`index_to_color`].
///
/// Returns `None` for colors that are not fully opaque, which includes the background.
#[must_use]
pub fn color_to_index(color: PackedColor) -> Option<u32> {
    let [r, g, b, a] = color.unpack();
    if a != 0xFF {
        return None;
    }
    Some(u32::from(r) | (u32::from(g) << 8) | (u32::from(b) << 16))
}
