//! Core abstractions for pickbuf.
//!
//! This crate provides the renderer-agnostic half of color-buffer picking:
//! - [`PackedColor`] pick colors and their encoding
//! - the nearest, rectangle and sparse resolvers that turn read-back pixels into objects
//! - [`PickSession`], which owns the off-screen target through a [`TargetBackend`]
//! - [`ObjectRegistry`] and the sequential [`PickRegistry`]
//! - a software [`CpuBackend`] for running sessions without a GPU

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod cpu;
pub mod error;
pub mod options;
pub mod palette;
pub mod pick;
pub mod pixels;
pub mod region;
pub mod registry;
pub mod resolve;
pub mod session;
pub mod spiral;

pub use cpu::{CpuBackend, CpuTarget};
pub use error::{PickError, Result};
pub use options::PickOptions;
pub use palette::Palette;
pub use pick::{color_to_index, index_to_color, PackedColor, MAX_PICK_INDEX};
pub use pixels::PixelBuffer;
pub use region::{PickProbe, Region, Viewport};
pub use registry::{ObjectRegistry, PickRegistry};
pub use resolve::{resolve_nearest, resolve_rect, resolve_sparse, BulkPick, DEFAULT_SPARSE_STRIDE};
pub use session::{PassState, PickSession, SessionStatus, TargetBackend};
pub use spiral::Spiral;

// Re-export glam types for convenience
pub use glam::Vec2;
