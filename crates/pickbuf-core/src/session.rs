//! Pick session: owns the off-screen pick target and drives readback.
//!
//! A session moves through three states:
//! - `Uninitialized`: no target yet
//! - `Allocated`: a target of a known size exists and is reused across probes
//! - `Destroyed`: terminal, every call fails with [`PickError::SessionDestroyed`]
//!
//! [`PickSession::begin`] (re)allocates the target when the viewport size
//! changes and hands back a [`PassState`] for the caller's pick draws. The
//! `end*` methods read the probed region back and resolve it to objects.

use crate::error::{PickError, Result};
use crate::options::PickOptions;
use crate::pixels::PixelBuffer;
use crate::region::{PickProbe, Region, Viewport};
use crate::registry::ObjectRegistry;
use crate::resolve::{self, BulkPick};

/// Allocates pick targets and reads pixels back from them.
pub trait TargetBackend {
    /// An off-screen color + depth/stencil target.
    type Target;

    /// Creates a `width × height` target.
    fn allocate(&mut self, width: u32, height: u32) -> Result<Self::Target>;

    /// Releases a target. Called exactly once per allocated target.
    fn release(&mut self, target: Self::Target);

    /// Copies `region` of `target` into memory. Blocks until the data is available.
    fn read_pixels(&self, target: &Self::Target, region: &Region) -> Result<PixelBuffer>;
}

/// Render state for the pass that paints pick colors.
///
/// Borrows the session, so the session cannot be re-begun or destroyed while
/// a pass state is alive.
#[derive(Debug)]
pub struct PassState<'a, T> {
    /// Target the pass renders into.
    pub target: &'a T,
    /// Scissor rectangle, clipped to the viewport.
    pub scissor: Region,
    /// Viewport covering the whole target.
    pub viewport: Viewport,
    /// Always false: pick colors must be written verbatim.
    pub blending_enabled: bool,
}

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Uninitialized,
    Allocated { width: u32, height: u32 },
    Destroyed,
}

enum TargetState<T> {
    Uninitialized,
    Allocated { target: T, width: u32, height: u32 },
    Destroyed,
}

/// Owns a pick target and resolves probes against it.
pub struct PickSession<B: TargetBackend> {
    backend: B,
    state: TargetState<B::Target>,
    options: PickOptions,
}

impl<B: TargetBackend> PickSession<B> {
    /// Creates a session with default options. No target is allocated until [`begin`](Self::begin).
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, PickOptions::default())
    }

    /// Creates a session with the given options.
    pub fn with_options(backend: B, options: PickOptions) -> Self {
        Self {
            backend,
            state: TargetState::Uninitialized,
            options,
        }
    }

    /// Prepares the target for a pick pass.
    ///
    /// The scissor is set to `screen_region` and the viewport to the full
    /// `viewport` size. If the target does not exist or its size differs from
    /// `viewport`, the old target is released and a new one allocated.
    /// Allocation errors are returned as is; the session is left without a
    /// target and the next `begin` will try again.
    pub fn begin(&mut self, screen_region: Region, viewport: Viewport) -> Result<PassState<'_, B::Target>> {
        viewport.validate()?;

        let reuse = match &self.state {
            TargetState::Destroyed => return Err(PickError::SessionDestroyed),
            TargetState::Allocated { width, height, .. } => {
                *width == viewport.width && *height == viewport.height
            }
            TargetState::Uninitialized => false,
        };

        if !reuse {
            if let TargetState::Allocated { target, width, height } =
                std::mem::replace(&mut self.state, TargetState::Uninitialized)
            {
                log::debug!(
                    "pick target resized {width}x{height} -> {}x{}",
                    viewport.width,
                    viewport.height
                );
                self.backend.release(target);
            }
            let target = self.backend.allocate(viewport.width, viewport.height)?;
            log::debug!("allocated {}x{} pick target", viewport.width, viewport.height);
            self.state = TargetState::Allocated {
                target,
                width: viewport.width,
                height: viewport.height,
            };
        }

        let TargetState::Allocated { target, .. } = &self.state else {
            return Err(PickError::NoTarget);
        };
        Ok(PassState {
            target,
            scissor: screen_region.clamped_to(viewport),
            viewport,
            blending_enabled: false,
        })
    }

    /// Reads `region` back and returns the object nearest its center.
    pub fn end<R: ObjectRegistry>(&self, region: Region, registry: &R) -> Result<Option<R::Object>> {
        let pixels = self.read(&region)?;
        Ok(resolve::resolve_nearest(&pixels, registry))
    }

    /// Reads `region` back and returns every object visible in it.
    pub fn end_bulk_rect<R: ObjectRegistry>(
        &self,
        region: Region,
        registry: &R,
    ) -> Result<Option<BulkPick<R::Object>>> {
        let pixels = self.read(&region)?;
        Ok(resolve::resolve_rect(&pixels, registry))
    }

    /// Reads `region` back and returns every object under the given hit boxes.
    ///
    /// Probe centers are relative to `region`, with y measured from its bottom edge.
    pub fn end_bulk<R: ObjectRegistry>(
        &self,
        region: Region,
        probes: &[PickProbe],
        registry: &R,
    ) -> Result<Option<BulkPick<R::Object>>> {
        let pixels = self.read(&region)?;
        Ok(resolve::resolve_sparse(
            &pixels,
            probes,
            self.options.sparse_stride,
            registry,
        ))
    }

    /// Reads `region` of the current target without resolving it.
    pub fn read(&self, region: &Region) -> Result<PixelBuffer> {
        region.validate()?;
        match &self.state {
            TargetState::Destroyed => Err(PickError::SessionDestroyed),
            TargetState::Uninitialized => Err(PickError::NoTarget),
            TargetState::Allocated {
                target,
                width,
                height,
            } => {
                if self.options.validate_regions && !region.fits_within(*width, *height) {
                    return Err(PickError::RegionOutOfBounds {
                        x: region.x,
                        y: region.y,
                        width: region.width,
                        height: region.height,
                        target_width: *width,
                        target_height: *height,
                    });
                }
                self.backend.read_pixels(target, region)
            }
        }
    }

    /// Releases the target. The session cannot be used afterwards.
    pub fn destroy(&mut self) {
        if let TargetState::Allocated { target, .. } =
            std::mem::replace(&mut self.state, TargetState::Destroyed)
        {
            self.backend.release(target);
            log::debug!("pick target released");
        }
    }

    /// Returns true once [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        matches!(self.state, TargetState::Destroyed)
    }

    /// Current lifecycle state.
    pub fn status(&self) -> SessionStatus {
        match &self.state {
            TargetState::Uninitialized => SessionStatus::Uninitialized,
            TargetState::Allocated { width, height, .. } => SessionStatus::Allocated {
                width: *width,
                height: *height,
            },
            TargetState::Destroyed => SessionStatus::Destroyed,
        }
    }

    /// The current target, if one is allocated.
    pub fn target(&self) -> Option<&B::Target> {
        match &self.state {
            TargetState::Allocated { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn options(&self) -> &PickOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: PickOptions) {
        self.options = options;
    }
}

impl<B: TargetBackend> Drop for PickSession<B> {
    fn drop(&mut self) {
        self.destroy();
    }
}
