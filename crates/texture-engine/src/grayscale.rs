//! Grayscale pixel grid

use crate::{Result, TextureError};
use ndarray::Array2;

/// Default number of gray levels (8-bit intensities)
pub const DEFAULT_GRAY_LEVELS: usize = 256;

/// Largest supported gray level count (a 4096x4096 co-occurrence matrix)
pub const MAX_GRAY_LEVELS: usize = 4096;

/// Check `gray_levels` lies in `[1, MAX_GRAY_LEVELS]`
pub fn validate_gray_levels(gray_levels: usize) -> Result<()> {
    if gray_levels == 0 {
        return Err(TextureError::EmptyGrayLevels);
    }
    if gray_levels > MAX_GRAY_LEVELS {
        return Err(TextureError::TooManyGrayLevels {
            levels: gray_levels,
            max: MAX_GRAY_LEVELS,
        });
    }
    Ok(())
}

/// Immutable 2-D grid of integer intensities, indexed `[row, col]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleMatrix {
    pixels: Array2<u32>,
}

impl GrayscaleMatrix {
    /// Wrap an existing intensity array
    pub fn new(pixels: Array2<u32>) -> Self {
        Self { pixels }
    }

    /// Build a matrix from nested rows, rejecting ragged input
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);

        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(TextureError::RaggedRows {
                    row,
                    expected: cols,
                    actual: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        let pixels = Array2::from_shape_vec((rows.len(), cols), data).map_err(|_| {
            TextureError::ShapeMismatch {
                width: cols,
                height: rows.len(),
                actual: rows.len() * cols,
            }
        })?;
        Ok(Self { pixels })
    }

    /// Build a matrix from a row-major 8-bit luminance buffer
    pub fn from_luma(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if data.len() != width * height {
            return Err(TextureError::ShapeMismatch {
                width,
                height,
                actual: data.len(),
            });
        }

        let widened: Vec<u32> = data.into_iter().map(u32::from).collect();
        let pixels = Array2::from_shape_vec((height, width), widened).map_err(|_| {
            TextureError::ShapeMismatch {
                width,
                height,
                actual: width * height,
            }
        })?;
        Ok(Self { pixels })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.pixels.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.pixels.ncols()
    }

    /// Shape as `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.pixels.dim()
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the grid has no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Intensity at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.pixels.get((row, col)).copied()
    }

    /// Iterate intensities in row-major order
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.pixels.iter().copied()
    }

    /// Borrow the underlying array
    pub fn pixels(&self) -> &Array2<u32> {
        &self.pixels
    }

    /// Check every intensity lies in `[0, gray_levels - 1]`.
    ///
    /// Reports the first offending pixel in row-major order.
    pub fn check_levels(&self, gray_levels: usize) -> Result<()> {
        validate_gray_levels(gray_levels)?;
        let max = (gray_levels - 1) as u32;

        match self
            .pixels
            .indexed_iter()
            .find(|&(_, &value)| value > max)
        {
            Some(((row, col), &value)) => Err(TextureError::IntensityOutOfRange {
                value,
                row,
                col,
                max,
            }),
            None => Ok(()),
        }
    }
}

impl From<Array2<u32>> for GrayscaleMatrix {
    fn from(pixels: Array2<u32>) -> Self {
        Self::new(pixels)
    }
}
