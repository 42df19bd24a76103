//! Error types for cloth construction.

use thiserror::Error;

/// Errors raised while validating a cloth or solver configuration.
///
/// Per-tick operations never fail: degenerate springs, pinned particles and
/// missed pointer grabs are handled by numeric guards instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClothError {
    /// Grid dimensions must be at least 2x2.
    #[error("grid must be at least 2x2, got {width}x{height}")]
    InvalidGridDimensions { width: usize, height: usize },
    /// Spacing must be positive and finite.
    #[error("spacing must be positive and finite, got {0}")]
    InvalidSpacing(f32),
    /// A solver or grid parameter is out of its valid range.
    #[error("invalid value for `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f32 },
    /// Viewport extents must be positive and finite.
    #[error("viewport must have positive extents, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}
