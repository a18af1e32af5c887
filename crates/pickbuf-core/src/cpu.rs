//! Software pick targets.
//!
//! [`CpuBackend`] keeps pick targets in memory so that sessions can run
//! without a GPU: callers paint pick colors with [`CpuTarget::fill_rect`] in
//! place of a render pass. Rows are stored top first, like a GPU texture.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{PickError, Result};
use crate::pick::PackedColor;
use crate::pixels::PixelBuffer;
use crate::region::Region;
use crate::session::TargetBackend;

/// An in-memory color target.
///
/// Painting goes through `&self` so a target borrowed from a
/// [`PassState`](crate::PassState) can be drawn into.
#[derive(Debug)]
pub struct CpuTarget {
    id: u64,
    image: RefCell<PixelBuffer>,
}

impl CpuTarget {
    /// Identifier unique among targets from the same backend.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// `(width, height)` of the target.
    pub fn size(&self) -> (u32, u32) {
        let image = self.image.borrow();
        (image.width(), image.height())
    }

    /// Fills the whole target with `color`.
    pub fn clear(&self, color: PackedColor) {
        let (width, height) = self.size();
        self.fill_rect(Region::new(0, 0, width, height), color);
    }

    /// Fills `rect`, clipped to the target, with `color`.
    pub fn fill_rect(&self, rect: Region, color: PackedColor) {
        let mut image = self.image.borrow_mut();
        let right = rect.x.saturating_add(rect.width).min(image.width());
        let bottom = rect.y.saturating_add(rect.height).min(image.height());
        for row in rect.y..bottom {
            for col in rect.x..right {
                image.set(col, row, color);
            }
        }
    }

    /// Sets a single pixel. Out-of-range coordinates are ignored.
    pub fn set_pixel(&self, col: u32, row: u32, color: PackedColor) {
        self.image.borrow_mut().set(col, row, color);
    }

    /// Copies `region` out of the target.
    pub fn read(&self, region: &Region) -> Result<PixelBuffer> {
        let image = self.image.borrow();
        if !region.fits_within(image.width(), image.height()) {
            return Err(PickError::RegionOutOfBounds {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                target_width: image.width(),
                target_height: image.height(),
            });
        }
        let stride = 4 * image.width() as usize;
        let row_bytes = 4 * region.width as usize;
        let mut data = Vec::with_capacity(row_bytes * region.height as usize);
        for row in region.y..region.y + region.height {
            let start = row as usize * stride + 4 * region.x as usize;
            data.extend_from_slice(&image.as_bytes()[start..start + row_bytes]);
        }
        PixelBuffer::new(region.width, region.height, data)
    }
}

/// Allocates [`CpuTarget`]s and counts allocations and releases.
#[derive(Debug, Default)]
pub struct CpuBackend {
    next_id: u64,
    allocations: usize,
    releases: Rc<Cell<usize>>,
    max_size: Option<(u32, u32)>,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes allocations larger than `width × height` fail.
    #[must_use]
    pub fn with_max_size(mut self, width: u32, height: u32) -> Self {
        self.max_size = Some((width, height));
        self
    }

    /// Number of targets allocated so far.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Number of targets released so far.
    pub fn releases(&self) -> usize {
        self.releases.get()
    }

    /// Shared release counter that outlives the backend.
    pub fn release_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.releases)
    }
}

impl TargetBackend for CpuBackend {
    type Target = CpuTarget;

    fn allocate(&mut self, width: u32, height: u32) -> Result<CpuTarget> {
        if let Some((max_width, max_height)) = self.max_size {
            if width > max_width || height > max_height {
                return Err(PickError::Allocation {
                    width,
                    height,
                    reason: format!("exceeds maximum size {max_width}x{max_height}"),
                });
            }
        }
        self.next_id += 1;
        self.allocations += 1;
        Ok(CpuTarget {
            id: self.next_id,
            image: RefCell::new(PixelBuffer::filled(width, height, PackedColor::BACKGROUND)),
        })
    }

    fn release(&mut self, target: CpuTarget) {
        self.releases.set(self.releases.get() + 1);
        drop(target);
    }

    fn read_pixels(&self, target: &CpuTarget, region: &Region) -> Result<PixelBuffer> {
        target.read(region)
    }
}
