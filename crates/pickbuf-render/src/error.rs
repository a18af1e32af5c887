//! Rendering error types.

use pickbuf_core::PickError;
use thiserror::Error;

/// Errors that can occur in the wgpu pick backend.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Failed to create wgpu adapter.
    #[error("failed to create graphics adapter")]
    AdapterCreationFailed,

    /// Failed to create wgpu device.
    #[error("failed to create graphics device: {0}")]
    DeviceCreationFailed(#[from] wgpu::RequestDeviceError),

    /// The requested target exceeds the device texture limit.
    #[error("{width}x{height} exceeds the maximum texture dimension {max}")]
    TextureTooLarge { width: u32, height: u32, max: u32 },

    /// Texture creation failed.
    #[error("texture creation failed: {0}")]
    TextureCreationFailed(String),

    /// Mapping the staging buffer failed.
    #[error("GPU buffer mapping failed: {0}")]
    BufferMapFailed(#[from] wgpu::BufferAsyncError),

    /// Waiting for the GPU failed.
    #[error("waiting for GPU failed: {0}")]
    PollFailed(#[from] wgpu::PollError),

    /// The map callback never reported back.
    #[error("GPU readback was dropped before completing")]
    ReadbackDropped,
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

impl From<RenderError> for PickError {
    fn from(err: RenderError) -> Self {
        PickError::Readback(err.to_string())
    }
}
