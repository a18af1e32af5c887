//! pickbuf: color-buffer object picking.
//!
//! Objects are drawn into an off-screen target with a unique pick color each.
//! Reading the target back and mapping colors to objects answers "what is under
//! the cursor" and "what is inside this rectangle".
//!
//! # Quick Start
//!
//! ```no_run
//! use pickbuf::*;
//!
//! fn main() -> Result<()> {
//!     let mut registry = PickRegistry::new();
//!     let color = registry.register("teapot")?;
//!
//!     let mut picker = Picker::new_headless()?;
//!     {
//!         let state = picker.begin(Region::new(0, 0, 640, 480), Viewport::new(640, 480))?;
//!         // Record draws that write `color.to_unorm()` for the teapot into
//!         // `begin_pick_pass(&mut encoder, &state)`, then submit.
//!         let _ = (state, color);
//!     }
//!
//!     if let Some(name) = picker.pick(320, 240, &registry)? {
//!         println!("picked {name}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Picks
//!
//! - [`Picker::pick`] - the object nearest a point, searched in a square spiral
//! - [`Picker::pick_rect`] - every object inside a rectangle
//! - [`Picker::pick_sparse`] - every object under a set of rough hit boxes

// Re-export core types
pub use pickbuf_core::{
    color_to_index, index_to_color, resolve_nearest, resolve_rect, resolve_sparse, BulkPick,
    CpuBackend, CpuTarget, ObjectRegistry, PackedColor, Palette, PassState, PickError,
    PickOptions, PickProbe, PickRegistry, PickSession, PixelBuffer, Region, Result,
    SessionStatus, TargetBackend, Vec2, Viewport, DEFAULT_SPARSE_STRIDE,
};

// Re-export render types
pub use pickbuf_render::{begin_pick_pass, RenderError, WgpuBackend, WgpuPickTarget};

/// High-level picking front end over a [`PickSession`].
pub struct Picker<B: TargetBackend = WgpuBackend> {
    session: PickSession<B>,
}

impl Picker<WgpuBackend> {
    /// Creates a picker on the renderer's device and queue.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self::with_backend(WgpuBackend::new(device, queue), PickOptions::default())
    }

    /// Creates a picker on its own headless device.
    pub fn new_headless() -> Result<Self> {
        let _ = env_logger::try_init();
        let backend = WgpuBackend::new_headless_blocking()?;
        log::info!("pickbuf headless picker initialized");
        Ok(Self::with_backend(backend, PickOptions::default()))
    }
}

impl<B: TargetBackend> Picker<B> {
    /// Creates a picker over any target backend.
    pub fn with_backend(backend: B, options: PickOptions) -> Self {
        Self {
            session: PickSession::with_options(backend, options),
        }
    }

    /// Prepares the pick target; see [`PickSession::begin`].
    pub fn begin(&mut self, screen_region: Region, viewport: Viewport) -> Result<PassState<'_, B::Target>> {
        self.session.begin(screen_region, viewport)
    }

    /// Returns the object nearest `(x, y)`.
    ///
    /// Searches a square of up to [`PickOptions::default_pick_size`] pixels
    /// centered on the point. Near the target edges the square shrinks so the
    /// point stays at its center.
    pub fn pick<R: ObjectRegistry>(&self, x: u32, y: u32, registry: &R) -> Result<Option<R::Object>> {
        let region = self.region_around(x, y)?;
        self.session.end(region, registry)
    }

    /// Returns the object nearest the center of `region`.
    pub fn pick_in<R: ObjectRegistry>(&self, region: Region, registry: &R) -> Result<Option<R::Object>> {
        self.session.end(region, registry)
    }

    /// Returns every object inside `region`.
    pub fn pick_rect<R: ObjectRegistry>(&self, region: Region, registry: &R) -> Result<Option<BulkPick<R::Object>>> {
        self.session.end_bulk_rect(region, registry)
    }

    /// Returns every object under `probes`, sampled from `region`.
    pub fn pick_sparse<R: ObjectRegistry>(
        &self,
        region: Region,
        probes: &[PickProbe],
        registry: &R,
    ) -> Result<Option<BulkPick<R::Object>>> {
        self.session.end_bulk(region, probes, registry)
    }

    /// Releases the pick target.
    pub fn destroy(&mut self) {
        self.session.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.session.is_destroyed()
    }

    pub fn session(&self) -> &PickSession<B> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PickSession<B> {
        &mut self.session
    }

    fn region_around(&self, x: u32, y: u32) -> Result<Region> {
        let size = self.session.options().default_pick_size;
        match self.session.status() {
            SessionStatus::Allocated { width, height } => {
                if x >= width || y >= height {
                    return Err(PickError::RegionOutOfBounds {
                        x,
                        y,
                        width: 1,
                        height: 1,
                        target_width: width,
                        target_height: height,
                    });
                }
                Ok(Region::around(x, y, size, Viewport::new(width, height)))
            }
            SessionStatus::Uninitialized => Err(PickError::NoTarget),
            SessionStatus::Destroyed => Err(PickError::SessionDestroyed),
        }
    }
}
