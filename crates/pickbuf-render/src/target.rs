//! Off-screen pick target: color texture plus combined depth/stencil.

use pickbuf_core::{PassState, Region};

use crate::error::{RenderError, RenderResult};

/// Color format of the pick texture (exact 8-bit channels, no sRGB conversion).
pub const PICK_COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Depth/stencil format of the pick target.
pub const PICK_DEPTH_STENCIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// GPU resources backing a pick session.
#[derive(Debug)]
pub struct WgpuPickTarget {
    color: wgpu::Texture,
    color_view: wgpu::TextureView,
    depth_stencil: wgpu::Texture,
    depth_stencil_view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl WgpuPickTarget {
    /// Creates the pick color and depth/stencil textures.
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> RenderResult<Self> {
        let max = device.limits().max_texture_dimension_2d;
        if width > max || height > max {
            return Err(RenderError::TextureTooLarge { width, height, max });
        }

        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        // Pick color texture (Rgba8Unorm for exact values). COPY_DST lets callers
        // upload pick colors without a draw.
        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Pick Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: PICK_COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());

        let depth_stencil = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Pick Depth Stencil Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: PICK_DEPTH_STENCIL_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth_stencil_view = depth_stencil.create_view(&wgpu::TextureViewDescriptor::default());

        let validation = pollster::block_on(device.pop_error_scope());
        let out_of_memory = pollster::block_on(device.pop_error_scope());
        if let Some(err) = validation.or(out_of_memory) {
            color.destroy();
            depth_stencil.destroy();
            return Err(RenderError::TextureCreationFailed(err.to_string()));
        }

        Ok(Self {
            color,
            color_view,
            depth_stencil,
            depth_stencil_view,
            width,
            height,
        })
    }

    /// `(width, height)` of the target.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The pick color texture.
    pub fn color_texture(&self) -> &wgpu::Texture {
        &self.color
    }

    /// The pick color texture view, for external rendering.
    pub fn color_view(&self) -> &wgpu::TextureView {
        &self.color_view
    }

    /// The depth/stencil texture view, for external rendering.
    pub fn depth_stencil_view(&self) -> &wgpu::TextureView {
        &self.depth_stencil_view
    }

    /// Frees the GPU memory immediately instead of waiting for the last handle to drop.
    pub fn destroy(self) {
        self.color.destroy();
        self.depth_stencil.destroy();
    }
}

/// Begins the render pass that paints pick colors into the session's target.
///
/// Color is cleared to transparent black, depth to 1.0 and stencil to 0.
/// The pass state's viewport and scissor are applied before returning.
#[allow(clippy::cast_precision_loss)]
pub fn begin_pick_pass<'e>(
    encoder: &'e mut wgpu::CommandEncoder,
    state: &PassState<'_, WgpuPickTarget>,
) -> wgpu::RenderPass<'e> {
    let target = state.target;
    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Pick Render Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: &target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT), // Background = (0,0,0,0)
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: &target.depth_stencil_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(0),
                store: wgpu::StoreOp::Store,
            }),
        }),
        ..Default::default()
    });

    pass.set_viewport(
        0.0,
        0.0,
        state.viewport.width as f32,
        state.viewport.height as f32,
        0.0,
        1.0,
    );
    let scissor = state.scissor;
    pass.set_scissor_rect(scissor.x, scissor.y, scissor.width, scissor.height);
    pass
}

/// Row pitch of a `width`-pixel RGBA8 copy, padded to wgpu's copy alignment.
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Strips row padding from a mapped staging buffer.
pub fn unpad_rows(padded: &[u8], width: u32, height: u32) -> Vec<u8> {
    let row_bytes = width as usize * 4;
    let pitch = padded_bytes_per_row(width) as usize;
    let mut pixels = Vec::with_capacity(row_bytes * height as usize);
    for row in padded.chunks(pitch).take(height as usize) {
        pixels.extend_from_slice(&row[..row_bytes]);
    }
    pixels
}

/// Copies `region` of the pick texture to memory, blocking until the GPU is done.
///
/// The region must lie inside the target.
pub fn read_region(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    target: &WgpuPickTarget,
    region: &Region,
) -> RenderResult<Vec<u8>> {
    let pitch = padded_bytes_per_row(region.width);
    let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Pick Staging Buffer"),
        size: u64::from(pitch) * u64::from(region.height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Pick Readback Encoder"),
    });

    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &target.color,
            mip_level: 0,
            origin: wgpu::Origin3d {
                x: region.x,
                y: region.y,
                z: 0,
            },
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &staging_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(pitch),
                rows_per_image: Some(region.height),
            },
        },
        wgpu::Extent3d {
            width: region.width,
            height: region.height,
            depth_or_array_layers: 1,
        },
    );

    queue.submit(std::iter::once(encoder.finish()));

    let buffer_slice = staging_buffer.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });

    device.poll(wgpu::PollType::wait_indefinitely())?;
    rx.recv().map_err(|_| RenderError::ReadbackDropped)??;

    let pixels = {
        let data = buffer_slice.get_mapped_range();
        unpad_rows(&data, region.width, region.height)
    };
    staging_buffer.unmap();
    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_bytes_per_row() {
        assert_eq!(padded_bytes_per_row(1), 256);
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(128), 512);
    }

    #[test]
    fn test_unpad_rows() {
        let pitch = padded_bytes_per_row(2) as usize;
        let mut padded = vec![0xEE; pitch * 2];
        padded[..8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
        padded[pitch..pitch + 8].copy_from_slice(&[9, 10, 11, 12, 13, 14, 15, 16]);
        let pixels = unpad_rows(&padded, 2, 2);
        assert_eq!(pixels, (1..=16).collect::<Vec<u8>>());
    }
}
