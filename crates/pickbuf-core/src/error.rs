//! Error types for pickbuf.

use thiserror::Error;

/// The main error type for pickbuf operations.
///
/// A probe that finds nothing is not an error: resolvers return `Ok(None)` for that.
#[derive(Error, Debug)]
pub enum PickError {
    /// The off-screen pick target could not be allocated.
    #[error("failed to allocate {width}x{height} pick target: {reason}")]
    Allocation {
        width: u32,
        height: u32,
        reason: String,
    },

    /// A region or viewport with a zero extent was supplied.
    #[error("region has zero extent ({width}x{height})")]
    EmptyRegion { width: u32, height: u32 },

    /// A readback region does not fit inside the current pick target.
    #[error(
        "region {x},{y} {width}x{height} exceeds {target_width}x{target_height} pick target"
    )]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        target_width: u32,
        target_height: u32,
    },

    /// Pixel data does not match the declared dimensions.
    #[error("pixel data size mismatch: expected {expected} bytes, got {actual}")]
    PixelSizeMismatch { expected: usize, actual: usize },

    /// A readback was requested before any target was allocated.
    #[error("no pick target allocated - call begin() first")]
    NoTarget,

    /// Every pick color has been handed out.
    #[error("out of unique pick ids ({max} issued)")]
    PickIdsExhausted { max: u32 },

    /// The session was destroyed and can no longer be used.
    #[error("pick session has been destroyed")]
    SessionDestroyed,

    /// Copying pixels out of the pick target failed.
    #[error("pixel readback failed: {0}")]
    Readback(String),

    /// Options could not be parsed or serialized.
    #[error("options error: {0}")]
    Config(#[from] serde_json::Error),
}

/// A specialized Result type for pickbuf operations.
pub type Result<T> = std::result::Result<T, PickError>;
