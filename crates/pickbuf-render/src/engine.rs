//! wgpu implementation of the pick target backend.

use pickbuf_core::{PickError, PixelBuffer, Region, TargetBackend};

use crate::error::{RenderError, RenderResult};
use crate::target::{read_region, WgpuPickTarget};

/// Allocates pick targets on a wgpu device and reads them back.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl WgpuBackend {
    /// Wraps an existing device and queue, typically the renderer's own.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }

    /// Creates a device without a surface.
    pub async fn new_headless() -> RenderResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderError::AdapterCreationFailed)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("pickbuf device (headless)"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        log::info!("pickbuf using adapter {}", adapter.get_info().name);
        Ok(Self::new(device, queue))
    }

    /// Blocking version of [`new_headless`](Self::new_headless).
    pub fn new_headless_blocking() -> RenderResult<Self> {
        pollster::block_on(Self::new_headless())
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}

impl TargetBackend for WgpuBackend {
    type Target = WgpuPickTarget;

    fn allocate(&mut self, width: u32, height: u32) -> pickbuf_core::Result<WgpuPickTarget> {
        WgpuPickTarget::new(&self.device, width, height).map_err(|err| PickError::Allocation {
            width,
            height,
            reason: err.to_string(),
        })
    }

    fn release(&mut self, target: WgpuPickTarget) {
        target.destroy();
    }

    fn read_pixels(&self, target: &WgpuPickTarget, region: &Region) -> pickbuf_core::Result<PixelBuffer> {
        // Out-of-range copies are a wgpu validation error, so refuse them here.
        let (width, height) = target.size();
        if !region.fits_within(width, height) {
            return Err(PickError::RegionOutOfBounds {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                target_width: width,
                target_height: height,
            });
        }
        let data = read_region(&self.device, &self.queue, target, region)?;
        PixelBuffer::new(region.width, region.height, data)
    }
}
