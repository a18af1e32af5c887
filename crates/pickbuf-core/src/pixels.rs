//! Pixel blocks read back from a pick target.

use crate::error::{PickError, Result};
use crate::pick::PackedColor;

/// A block of RGBA8 pixels, row-major, row 0 first in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw RGBA bytes. `data.len()` must be `4 * width * height`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PickError::EmptyRegion { width, height });
        }
        let expected = 4 * width as usize * height as usize;
        if data.len() != expected {
            return Err(PickError::PixelSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a buffer with every pixel set to `color`.
    #[must_use]
    pub fn filled(width: u32, height: u32, color: PackedColor) -> Self {
        let count = width as usize * height as usize;
        let rgba = color.unpack();
        let mut data = Vec::with_capacity(count * 4);
        for _ in 0..count {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Builds a buffer from packed colors, one per pixel.
    pub fn from_colors(width: u32, height: u32, colors: &[PackedColor]) -> Result<Self> {
        let data = colors.iter().flat_map(|c| c.unpack()).collect();
        Self::new(width, height, data)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels in the block.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer, returning the raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Packed color at the given byte offset (must be a multiple of 4).
    #[must_use]
    pub fn color_at_byte(&self, offset: usize) -> PackedColor {
        PackedColor::pack(
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        )
    }

    /// Packed color at `(col, row)`, or `None` outside the block.
    #[must_use]
    pub fn color_at(&self, col: u32, row: u32) -> Option<PackedColor> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let index = row as usize * self.width as usize + col as usize;
        Some(self.color_at_byte(4 * index))
    }

    /// Every pixel packed into a `u32` color, in memory order.
    #[must_use]
    pub fn packed(&self) -> Vec<PackedColor> {
        bytemuck::cast_slice::<u8, [u8; 4]>(&self.data)
            .iter()
            .copied()
            .map(PackedColor::from_rgba)
            .collect()
    }

    /// Sets the pixel at `(col, row)`. Out-of-range coordinates are ignored.
    pub fn set(&mut self, col: u32, row: u32, color: PackedColor) {
        if col >= self.width || row >= self.height {
            return;
        }
        let offset = 4 * (row as usize * self.width as usize + col as usize);
        self.data[offset..offset + 4].copy_from_slice(&color.unpack());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            PixelBuffer::new(2, 2, vec![0; 15]),
            Err(PickError::PixelSizeMismatch {
                expected: 16,
                actual: 15
            })
        ));
        assert!(matches!(
            PixelBuffer::new(0, 2, Vec::new()),
            Err(PickError::EmptyRegion { .. })
        ));
    }

    #[test]
    fn test_packed_follows_memory_order() {
        let a = PackedColor::pack(1, 2, 3, 4);
        let b = PackedColor::pack(5, 6, 7, 8);
        let buffer = PixelBuffer::from_colors(2, 1, &[a, b]).unwrap();
        assert_eq!(buffer.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(buffer.packed(), vec![a, b]);
    }

    #[test]
    fn test_color_at_and_set() {
        let red = PackedColor::pack(255, 0, 0, 255);
        let mut buffer = PixelBuffer::filled(3, 2, PackedColor::BACKGROUND);
        buffer.set(2, 1, red);
        buffer.set(9, 9, red);
        assert_eq!(buffer.color_at(2, 1), Some(red));
        assert_eq!(buffer.color_at(0, 0), Some(PackedColor::BACKGROUND));
        assert_eq!(buffer.color_at(3, 0), None);
        assert_eq!(buffer.color_at_byte(4 * 5), red);
    }
}
