//! Texture Error Types

use thiserror::Error;

/// Errors raised before any texture computation starts.
///
/// All variants describe invalid input: they are never clamped or coerced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TextureError {
    /// Gray level count must be at least 1
    #[error("gray_levels must be at least 1")]
    EmptyGrayLevels,

    /// Gray level count would make the co-occurrence matrix too large
    #[error("gray_levels {levels} exceeds the maximum of {max}")]
    TooManyGrayLevels { levels: usize, max: usize },

    /// Displacement distance must be a positive integer
    #[error("distance must be a positive integer, got {0}")]
    InvalidDistance(i64),

    /// Displacement angle must be finite
    #[error("angle must be a finite number of degrees, got {0}")]
    InvalidAngle(f64),

    /// Nested rows do not form a rectangular grid
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Raw pixel buffer does not match the declared shape
    #[error("pixel buffer has {actual} values, expected {width}x{height}")]
    ShapeMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },

    /// Pixel intensity outside [0, gray_levels - 1]
    #[error("intensity {value} at ({row}, {col}) is out of range [0, {max}]")]
    IntensityOutOfRange {
        value: u32,
        row: usize,
        col: usize,
        max: u32,
    },

    /// Image has no pixels to take moments of
    #[error("image has no pixels")]
    EmptyImage,

    /// Co-occurrence matrix is not square or holds negative/non-finite cells
    #[error("invalid co-occurrence matrix: {0}")]
    InvalidMatrix(String),
}
