//! Intensity Distribution Moments

use crate::grayscale::GrayscaleMatrix;
use crate::{Result, TextureError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Order statistic and population moments of an image's intensities.
///
/// Skewness and kurtosis are undefined when the variance is zero (a
/// constant image). They are then reported as `0.0`; use
/// [`MomentFeatures::shape_defined`] to tell that case apart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentFeatures {
    /// Median intensity (mean of the two middle values on even counts)
    pub median: f64,
    /// Population variance (divide by N)
    pub variance: f64,
    /// Skewness: E[(X-μ)³] / σ³
    pub asymmetry: f64,
    /// Excess kurtosis: E[(X-μ)⁴] / σ⁴ - 3
    pub kurtosis: f64,
}

impl MomentFeatures {
    /// Compute moments over the flattened intensities of `image`.
    ///
    /// Intensities are tallied into a histogram first, so the cost depends
    /// on the number of distinct values rather than a full sort.
    ///
    /// # Errors
    /// `EmptyImage` when the image has no pixels.
    pub fn extract(image: &GrayscaleMatrix) -> Result<Self> {
        if image.is_empty() {
            return Err(TextureError::EmptyImage);
        }

        let mut histogram: BTreeMap<u32, u64> = BTreeMap::new();
        for value in image.values() {
            *histogram.entry(value).or_insert(0) += 1;
        }

        let n = image.len() as f64;
        let median = median(&histogram, image.len() as u64);

        // Mean
        let mean = histogram
            .iter()
            .map(|(&v, &count)| v as f64 * count as f64)
            .sum::<f64>()
            / n;

        // Central moments
        let mut m2 = 0.0;
        let mut m3 = 0.0;
        let mut m4 = 0.0;

        for (&v, &count) in &histogram {
            let d = v as f64 - mean;
            let weight = count as f64;
            m2 += weight * d * d;
            m3 += weight * d * d * d;
            m4 += weight * d * d * d * d;
        }

        let variance = m2 / n;
        let std_dev = variance.sqrt();

        let asymmetry = if std_dev > 0.0 {
            (m3 / n) / (std_dev * std_dev * std_dev)
        } else {
            0.0
        };

        let kurtosis = if std_dev > 0.0 {
            (m4 / n) / (variance * variance) - 3.0
        } else {
            0.0
        };

        Ok(Self {
            median,
            variance,
            asymmetry,
            kurtosis,
        })
    }

    /// Whether skewness and kurtosis are defined (non-zero variance)
    pub fn shape_defined(&self) -> bool {
        self.variance > 0.0
    }
}

/// Median of `total` values tallied in a sorted histogram
fn median(histogram: &BTreeMap<u32, u64>, total: u64) -> f64 {
    // 0-based ranks of the middle element(s)
    let upper = total / 2;
    let lower = if total % 2 == 0 { upper - 1 } else { upper };

    let mut seen = 0u64;
    let mut low_value = None;
    for (&v, &count) in histogram {
        seen += count;
        if low_value.is_none() && seen > lower {
            low_value = Some(v);
        }
        if seen > upper {
            let low = low_value.unwrap_or(v);
            return (low as f64 + v as f64) / 2.0;
        }
    }
    0.0
}
