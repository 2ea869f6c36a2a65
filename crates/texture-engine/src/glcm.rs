//! Gray-Level Co-occurrence Matrix construction

use crate::grayscale::GrayscaleMatrix;
use crate::{Result, TextureError};
use ndarray::{s, Array2, Zip};
use serde::Serialize;
use tracing::debug;

/// Default neighbor distance in pixels
pub const DEFAULT_DISTANCE: i64 = 1;

/// Default neighbor angle in degrees (horizontal, to the right)
pub const DEFAULT_ANGLE_DEGREES: f64 = 0.0;

/// Pixel displacement used to pair each pixel with its neighbor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Displacement {
    distance: i64,
    angle_degrees: f64,
}

impl Displacement {
    /// Create a displacement; `distance` must be positive and `angle_degrees` finite
    pub fn new(distance: i64, angle_degrees: f64) -> Result<Self> {
        if distance <= 0 {
            return Err(TextureError::InvalidDistance(distance));
        }
        if !angle_degrees.is_finite() {
            return Err(TextureError::InvalidAngle(angle_degrees));
        }
        Ok(Self {
            distance,
            angle_degrees,
        })
    }

    /// Distance in pixels
    pub fn distance(&self) -> i64 {
        self.distance
    }

    /// Angle in degrees
    pub fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    /// Integer offset `(dx, dy)` from rounding `distance * (cos, sin)`.
    ///
    /// `dx` moves along columns and `dy` along rows, so 90 degrees points
    /// to the pixel below.
    pub fn offset(&self) -> (i64, i64) {
        let radians = self.angle_degrees.to_radians();
        let distance = self.distance as f64;
        let dx = (distance * radians.cos()).round() as i64;
        let dy = (distance * radians.sin()).round() as i64;
        (dx, dy)
    }

    /// Same distance, opposite direction
    pub fn reversed(&self) -> Self {
        Self {
            distance: self.distance,
            angle_degrees: self.angle_degrees + 180.0,
        }
    }
}

impl Default for Displacement {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            angle_degrees: DEFAULT_ANGLE_DEGREES,
        }
    }
}

/// Normalized co-occurrence matrix of size `levels x levels`.
///
/// Cell `[a, b]` estimates the probability that a pixel of intensity `a` has
/// a neighbor of intensity `b` at the building displacement. The count is
/// directed, so the matrix is generally not symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct CoOccurrenceMatrix {
    probabilities: Array2<f64>,
    pair_count: u64,
}

impl CoOccurrenceMatrix {
    /// Wrap an existing probability matrix.
    ///
    /// The matrix must be square with finite, non-negative cells. It is
    /// taken as-is, without renormalization.
    pub fn from_probabilities(probabilities: Array2<f64>) -> Result<Self> {
        let (rows, cols) = probabilities.dim();
        if rows != cols {
            return Err(TextureError::InvalidMatrix(format!(
                "expected a square matrix, got {}x{}",
                rows, cols
            )));
        }
        if let Some(bad) = probabilities.iter().find(|p| !p.is_finite() || **p < 0.0) {
            return Err(TextureError::InvalidMatrix(format!(
                "cell value {} is negative or not finite",
                bad
            )));
        }
        Ok(Self {
            probabilities,
            pair_count: 0,
        })
    }

    /// Number of gray levels (side length)
    pub fn levels(&self) -> usize {
        self.probabilities.nrows()
    }

    /// Probability of the directed pair `(a, b)`
    pub fn get(&self, a: usize, b: usize) -> Option<f64> {
        self.probabilities.get((a, b)).copied()
    }

    /// Valid neighbor pairs counted while building; 0 for wrapped matrices
    pub fn pair_count(&self) -> u64 {
        self.pair_count
    }

    /// Sum of all cells: 1.0 after normalization, 0.0 when degenerate
    pub fn total(&self) -> f64 {
        self.probabilities.sum()
    }

    /// Whether every cell is zero (no valid neighbor pairs)
    pub fn is_degenerate(&self) -> bool {
        self.probabilities.iter().all(|&p| p == 0.0)
    }

    /// Matrix for the reversed neighbor relation
    pub fn transpose(&self) -> Self {
        Self {
            probabilities: self.probabilities.t().to_owned(),
            pair_count: self.pair_count,
        }
    }

    /// Non-zero cells as `(a, b, probability)`, row-major
    pub fn nonzero_cells(&self) -> Vec<(usize, usize, f64)> {
        self.probabilities
            .indexed_iter()
            .filter(|&(_, &p)| p != 0.0)
            .map(|((a, b), &p)| (a, b, p))
            .collect()
    }

    /// Borrow the underlying array
    pub fn as_array(&self) -> &Array2<f64> {
        &self.probabilities
    }

    /// Consume into the underlying array
    pub fn into_array(self) -> Array2<f64> {
        self.probabilities
    }
}

/// Source index range whose neighbors at `offset` stay inside `[0, len)`
fn overlap(len: usize, offset: i64) -> Option<(usize, usize)> {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let start = offset.saturating_neg().max(0);
    let end = len.saturating_sub(offset).min(len);
    if start < end {
        Some((start as usize, end as usize))
    } else {
        None
    }
}

/// Build the normalized co-occurrence matrix of `image` at `displacement`.
///
/// Every pixel whose neighbor lies inside the image contributes one count to
/// `[intensity, neighbor intensity]`; out-of-bounds neighbors are dropped
/// without wraparound or padding. Counts are divided by the number of valid
/// pairs. When there are none (e.g. a 1x1 image, or a displacement larger
/// than the image) the all-zero matrix is returned instead.
///
/// # Errors
/// `EmptyGrayLevels` when `gray_levels` is 0, `TooManyGrayLevels` above
/// `MAX_GRAY_LEVELS` (checked before allocating), `IntensityOutOfRange` when
/// a pixel is not in `[0, gray_levels - 1]`.
pub fn build_glcm(
    image: &GrayscaleMatrix,
    displacement: Displacement,
    gray_levels: usize,
) -> Result<CoOccurrenceMatrix> {
    image.check_levels(gray_levels)?;

    let (dx, dy) = displacement.offset();
    let (rows, cols) = image.shape();
    let mut counts = Array2::<u64>::zeros((gray_levels, gray_levels));

    if let (Some((r0, r1)), Some((c0, c1))) = (overlap(rows, dy), overlap(cols, dx)) {
        let pixels = image.pixels();
        let current = pixels.slice(s![r0..r1, c0..c1]);
        // In range by construction of `overlap`
        let nr0 = (r0 as i64 + dy) as usize;
        let nc0 = (c0 as i64 + dx) as usize;
        let neighbors = pixels.slice(s![nr0..nr0 + (r1 - r0), nc0..nc0 + (c1 - c0)]);

        Zip::from(&current).and(&neighbors).for_each(|&a, &b| {
            counts[[a as usize, b as usize]] += 1;
        });
    }

    let pair_count: u64 = counts.sum();
    debug!(
        "GLCM {}x{} image, offset=({}, {}), levels={}, pairs={}",
        rows, cols, dx, dy, gray_levels, pair_count
    );

    let probabilities = if pair_count > 0 {
        let total = pair_count as f64;
        counts.mapv(|c| c as f64 / total)
    } else {
        Array2::zeros((gray_levels, gray_levels))
    };

    Ok(CoOccurrenceMatrix {
        probabilities,
        pair_count,
    })
}
