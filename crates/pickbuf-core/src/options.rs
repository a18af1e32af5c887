//! Configuration options for pick sessions.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resolve::DEFAULT_SPARSE_STRIDE;

/// Options controlling how a [`PickSession`](crate::PickSession) reads and resolves pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickOptions {
    /// Sampling step, in pixels, for sparse bulk picks.
    pub sparse_stride: u32,

    /// Whether readback regions are checked against the target size before reading.
    pub validate_regions: bool,

    /// Side of the square region used by centered single picks.
    pub default_pick_size: u32,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            sparse_stride: DEFAULT_SPARSE_STRIDE,
            validate_regions: true,
            default_pick_size: 1,
        }
    }
}

impl PickOptions {
    /// Parses options from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the sparse sampling stride.
    pub fn with_sparse_stride(mut self, stride: u32) -> Self {
        self.sparse_stride = stride.max(1);
        self
    }

    /// Sets the side of centered single-pick regions.
    pub fn with_pick_size(mut self, size: u32) -> Self {
        self.default_pick_size = size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PickError;

    #[test]
    fn test_defaults() {
        let opts = PickOptions::default();
        assert_eq!(opts.sparse_stride, 10);
        assert!(opts.validate_regions);
        assert_eq!(opts.default_pick_size, 1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let opts = PickOptions::from_json(r#"{ "sparse_stride": 4 }"#).unwrap();
        assert_eq!(opts.sparse_stride, 4);
        assert!(opts.validate_regions);
    }

    #[test]
    fn test_json_roundtrip() {
        let opts = PickOptions::default().with_sparse_stride(3).with_pick_size(5);
        let json = opts.to_json().unwrap();
        assert_eq!(PickOptions::from_json(&json).unwrap(), opts);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(PickOptions::from_json("{ nope"), Err(PickError::Config(_))));
    }

    #[test]
    fn test_builders_clamp_to_one() {
        let opts = PickOptions::default().with_sparse_stride(0).with_pick_size(0);
        assert_eq!(opts.sparse_stride, 1);
        assert_eq!(opts.default_pick_size, 1);
    }
}
