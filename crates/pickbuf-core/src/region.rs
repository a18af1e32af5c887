//! Screen regions, viewports, and sparse pick probes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{PickError, Result};

/// A rectangle in pick-target pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for Region {
    /// A single-pixel probe at the origin.
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
        }
    }
}

impl Region {
    /// Creates a new region.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a single-pixel region.
    #[must_use]
    pub const fn pixel(x: u32, y: u32) -> Self {
        Self::new(x, y, 1, 1)
    }

    /// Creates a region from optional extents, defaulting missing ones to 1.
    #[must_use]
    pub fn with_optional_size(x: u32, y: u32, width: Option<u32>, height: Option<u32>) -> Self {
        Self::new(x, y, width.unwrap_or(1), height.unwrap_or(1))
    }

    /// Creates the square region centered on `(cx, cy)` used by point picks.
    ///
    /// The side is odd so the point stays at the center of the block. The
    /// square reaches at most `size / 2` pixels out and shrinks near the
    /// viewport edges instead of shifting. The point must lie inside `viewport`.
    #[must_use]
    pub fn around(cx: u32, cy: u32, size: u32, viewport: Viewport) -> Self {
        let half = (size / 2)
            .min(cx)
            .min(cy)
            .min(viewport.width.saturating_sub(cx).saturating_sub(1))
            .min(viewport.height.saturating_sub(cy).saturating_sub(1));
        let side = 2 * half + 1;
        Self::new(cx - half, cy - half, side, side)
    }

    /// Creates a region covering a whole viewport.
    #[must_use]
    pub const fn full(viewport: Viewport) -> Self {
        Self::new(0, 0, viewport.width, viewport.height)
    }

    /// Number of pixels covered.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Checks the region has a non-zero extent.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PickError::EmptyRegion {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Returns true if the region lies entirely inside a `width × height` target.
    #[must_use]
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(height)
    }

    /// Clips the region to the viewport bounds. The result may have a zero extent.
    #[must_use]
    pub fn clamped_to(&self, viewport: Viewport) -> Self {
        let x = self.x.min(viewport.width);
        let y = self.y.min(viewport.height);
        let right = self.x.saturating_add(self.width).min(viewport.width);
        let bottom = self.y.saturating_add(self.height).min(viewport.height);
        Self::new(x, y, right - x, bottom - y)
    }
}

/// Size of the off-screen pick target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Creates a new viewport.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Checks the viewport has a non-zero extent.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PickError::EmptyRegion {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// A rough hit box used by sparse bulk picking.
///
/// `center` is in drawing-buffer coordinates with the origin at the bottom-left
/// of the read region; `diff` holds the half extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PickProbe {
    pub center: Vec2,
    pub diff: Vec2,
}

impl PickProbe {
    /// Creates a new probe.
    #[must_use]
    pub const fn new(center: Vec2, diff: Vec2) -> Self {
        Self { center, diff }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single_pixel() {
        let region = Region::default();
        assert_eq!((region.width, region.height), (1, 1));
        assert_eq!(Region::with_optional_size(4, 5, None, Some(3)), Region::new(4, 5, 1, 3));
    }

    #[test]
    fn test_validate_rejects_zero_extent() {
        assert!(Region::new(0, 0, 0, 4).validate().is_err());
        assert!(Region::new(0, 0, 4, 0).validate().is_err());
        assert!(Region::new(0, 0, 1, 1).validate().is_ok());
        assert!(Viewport::new(0, 10).validate().is_err());
    }

    #[test]
    fn test_fits_within() {
        assert!(Region::new(0, 0, 10, 10).fits_within(10, 10));
        assert!(!Region::new(5, 0, 6, 1).fits_within(10, 10));
        assert!(!Region::new(u32::MAX, 0, 2, 1).fits_within(10, 10));
    }

    #[test]
    fn test_clamped_to_viewport() {
        let viewport = Viewport::new(100, 50);
        assert_eq!(Region::new(90, 40, 20, 20).clamped_to(viewport), Region::new(90, 40, 10, 10));
        assert_eq!(Region::new(10, 10, 5, 5).clamped_to(viewport), Region::new(10, 10, 5, 5));
        assert_eq!(Region::new(200, 10, 5, 5).clamped_to(viewport).width, 0);
    }

    #[test]
    fn test_around_keeps_point_centered() {
        let viewport = Viewport::new(10, 10);
        assert_eq!(Region::around(5, 5, 5, viewport), Region::new(3, 3, 5, 5));
        assert_eq!(Region::around(5, 5, 4, viewport), Region::new(3, 3, 5, 5));
        assert_eq!(Region::around(5, 5, 0, viewport), Region::pixel(5, 5));
    }

    #[test]
    fn test_around_shrinks_at_edges() {
        let viewport = Viewport::new(10, 10);
        assert_eq!(Region::around(0, 0, 5, viewport), Region::pixel(0, 0));
        assert_eq!(Region::around(9, 9, 5, viewport), Region::pixel(9, 9));
        assert_eq!(Region::around(1, 5, 7, viewport), Region::new(0, 4, 3, 3));
        assert_eq!(Region::around(8, 4, 9, viewport), Region::new(7, 3, 3, 3));
    }
}
