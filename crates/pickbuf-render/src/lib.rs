//! wgpu backend for pickbuf.
//!
//! This crate provides:
//! - [`WgpuBackend`], a [`TargetBackend`](pickbuf_core::TargetBackend) over a wgpu device
//! - [`WgpuPickTarget`], the color + depth/stencil textures picks are rendered into
//! - [`begin_pick_pass`] to open a render pass configured from a [`PassState`](pickbuf_core::PassState)

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod engine;
pub mod error;
pub mod target;

pub use engine::WgpuBackend;
pub use error::{RenderError, RenderResult};
pub use target::{
    begin_pick_pass, padded_bytes_per_row, read_region, unpad_rows, WgpuPickTarget,
    PICK_COLOR_FORMAT, PICK_DEPTH_STENCIL_FORMAT,
};
