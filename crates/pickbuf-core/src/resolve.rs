//! Color-to-object resolution over a pixel block read back from the pick target.
//!
//! All resolvers are pure functions of the pixels, the probes and the registry.
//! A probe that hits nothing returns `None`.

use crate::palette::Palette;
use crate::pixels::PixelBuffer;
use crate::region::PickProbe;
use crate::registry::ObjectRegistry;
use crate::spiral::Spiral;

/// Sampling step, in pixels, used by [`resolve_sparse`] unless configured otherwise.
pub const DEFAULT_SPARSE_STRIDE: u32 = 10;

/// Objects found by a bulk pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkPick<T> {
    /// Resolved objects in discovery order, without duplicates.
    pub objects: Vec<T>,
    /// The palette filled up before every pixel was examined, so some objects
    /// may be missing.
    pub truncated: bool,
}

impl<T> BulkPick<T> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.objects.iter()
    }
}

impl<T> IntoIterator for BulkPick<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

/// Finds the object closest to the center of the block.
///
/// Pixels are tested in square-spiral order starting at the center, and the
/// first one whose color resolves wins. "Closest" therefore means earliest in
/// the spiral, not smallest Euclidean distance. Non-square blocks walk the
/// spiral over the larger side and skip cells outside the block.
pub fn resolve_nearest<R: ObjectRegistry>(pixels: &PixelBuffer, registry: &R) -> Option<R::Object> {
    let width = i64::from(pixels.width());
    let height = i64::from(pixels.height());
    let half_width = width / 2;
    let half_height = height / 2;
    let max_side = pixels.width().max(pixels.height());

    for (x, y) in Spiral::covering(max_side) {
        if x < -half_width || x > half_width || y < -half_height || y > half_height {
            continue;
        }
        let col = x + half_width;
        let row = half_height - y;
        // Even extents reach one cell past the block edge.
        if col >= width || row >= height {
            continue;
        }
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let index = 4 * (row * width + col) as usize;
        if let Some(object) = registry.resolve_color(pixels.color_at_byte(index)) {
            return Some(object);
        }
    }
    None
}

/// Finds every distinct object in the block.
///
/// The palette is sized from [`ObjectRegistry::identifier_count`]; once it is
/// full the scan stops and the result is flagged as truncated.
///
/// A background first pixel does not take a palette slot, unlike a palette
/// that always stores the first pixel: with capacity 1 the pixels
/// `[background, c1]` still resolve to `c1` instead of nothing.
pub fn resolve_rect<R: ObjectRegistry>(pixels: &PixelBuffer, registry: &R) -> Option<BulkPick<R::Object>> {
    let colors = pixels.packed();
    let mut palette = Palette::with_capacity(registry.identifier_count());

    if let Some((&first, rest)) = colors.split_first() {
        palette.seed(first);
        for (i, &color) in rest.iter().enumerate() {
            if palette.is_full() {
                log::debug!(
                    "pick palette full ({} colors), {} pixels left unscanned",
                    palette.capacity(),
                    rest.len() - i
                );
                palette.mark_truncated();
                break;
            }
            palette.offer(color);
        }
    }

    collect(&palette, registry)
}

/// Finds every distinct object under a set of rough hit boxes.
///
/// Each probe is sampled on a grid with spacing `stride` over
/// `[-diff, diff - stride]` around its center, reading row
/// `height - (y + i)` and column `x + j` of the block. Samples falling outside
/// the block are skipped. One palette is shared by all probes, so an object
/// under several probes is reported once.
pub fn resolve_sparse<R: ObjectRegistry>(
    pixels: &PixelBuffer,
    probes: &[PickProbe],
    stride: u32,
    registry: &R,
) -> Option<BulkPick<R::Object>> {
    let step = i64::from(stride.max(1));
    let stride = stride.max(1) as usize;
    let width = i64::from(pixels.width());
    let height = i64::from(pixels.height());
    let mut palette = Palette::with_capacity(registry.identifier_count());

    'probes: for probe in probes {
        let x = round(probe.center.x);
        let y = round(probe.center.y);
        let diff_x = round(probe.diff.x);
        let diff_y = round(probe.diff.y);

        for i in (-diff_x..=diff_x - step).step_by(stride) {
            for j in (-diff_y..=diff_y - step).step_by(stride) {
                if palette.is_full() {
                    palette.mark_truncated();
                    log::debug!("pick palette full ({} colors), remaining samples skipped", palette.capacity());
                    break 'probes;
                }
                let row = height - (y + i);
                let col = x + j;
                if row < 0 || col < 0 || row >= height || col >= width {
                    log::trace!("sparse pick sample ({col}, {row}) outside {width}x{height} block");
                    continue;
                }
                #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
                let color = pixels.color_at_byte(4 * (row * width + col) as usize);
                palette.offer(color);
            }
        }
    }

    collect(&palette, registry)
}

fn collect<R: ObjectRegistry>(palette: &Palette, registry: &R) -> Option<BulkPick<R::Object>> {
    let objects: Vec<_> = palette.iter().filter_map(|color| registry.resolve_color(color)).collect();
    if objects.is_empty() {
        return None;
    }
    Some(BulkPick {
        objects,
        truncated: palette.truncated(),
    })
}

#[allow(clippy::cast_possible_truncation)]
fn round(value: f32) -> i64 {
    value.round() as i64
}
