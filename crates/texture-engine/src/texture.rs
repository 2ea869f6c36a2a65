//! Co-occurrence texture features

use crate::glcm::CoOccurrenceMatrix;
use serde::{Deserialize, Serialize};

/// Offset added inside the entropy logarithm to avoid `log2(0)`
pub const ENTROPY_EPSILON: f64 = 1e-10;

/// Upper bound on `|entropy - exact entropy|` introduced by [`ENTROPY_EPSILON`].
///
/// Each cell deviates by `p * log2(1 + eps / p) <= eps / ln 2`, so a matrix
/// with `levels^2` cells deviates by at most `levels^2 * eps / ln 2`. The
/// computed entropy is never larger than the exact one.
pub fn entropy_bias_bound(levels: usize) -> f64 {
    (levels as f64).powi(2) * ENTROPY_EPSILON / std::f64::consts::LN_2
}

/// Scalar texture statistics of a normalized co-occurrence matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TextureFeatures {
    /// Sum of `(i - j)^2 * P[i][j]`: local intensity variation
    pub contrast: f64,
    /// Sum of `P[i][j] / (1 + (i - j)^2)`: closeness to the diagonal
    pub homogeneity: f64,
    /// Sum of `P[i][j]^2` (angular second moment): uniformity
    pub energy: f64,
    /// `-sum P[i][j] * log2(P[i][j] + eps)`: randomness, in bits
    pub entropy: f64,
}

impl TextureFeatures {
    /// Compute all four features in one pass over the matrix.
    ///
    /// An all-zero matrix yields zero for every feature.
    pub fn extract(glcm: &CoOccurrenceMatrix) -> Self {
        let mut features = Self::default();
        let mut log_sum = 0.0;

        for ((i, j), &p) in glcm.as_array().indexed_iter() {
            let diff = i as f64 - j as f64;
            let diff_sq = diff * diff;

            features.energy += p * p;
            features.contrast += diff_sq * p;
            features.homogeneity += p / (1.0 + diff_sq);
            log_sum += p * (p + ENTROPY_EPSILON).log2();
        }

        features.entropy = -log_sum;
        features
    }
}
