//! Feature Record Assembly

use crate::glcm::{build_glcm, CoOccurrenceMatrix, Displacement};
use crate::grayscale::{validate_gray_levels, GrayscaleMatrix, DEFAULT_GRAY_LEVELS};
use crate::moments::MomentFeatures;
use crate::texture::TextureFeatures;
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of scalar features in a record
pub const FEATURE_COUNT: usize = 8;

/// Texture and moment features of one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Where the image came from (usually its path)
    pub source: String,
    /// Co-occurrence features
    #[serde(flatten)]
    pub texture: TextureFeatures,
    /// Intensity distribution moments
    #[serde(flatten)]
    pub moments: MomentFeatures,
}

impl FeatureRecord {
    /// Feature names, in [`FeatureRecord::values`] order
    pub const FEATURE_NAMES: [&'static str; FEATURE_COUNT] = [
        "contrast",
        "homogeneity",
        "energy",
        "entropy",
        "median",
        "variance",
        "asymmetry",
        "kurtosis",
    ];

    /// All eight feature values
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.texture.contrast,
            self.texture.homogeneity,
            self.texture.energy,
            self.texture.entropy,
            self.moments.median,
            self.moments.variance,
            self.moments.asymmetry,
            self.moments.kurtosis,
        ]
    }

    /// Value of a feature by name
    pub fn value(&self, name: &str) -> Option<f64> {
        Self::FEATURE_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|idx| self.values()[idx])
    }
}

/// Compute the feature record for one image.
///
/// Builds the co-occurrence matrix at `displacement` with `gray_levels`
/// levels, derives its texture features, and takes the intensity moments.
pub fn assemble(
    source: impl Into<String>,
    image: &GrayscaleMatrix,
    displacement: Displacement,
    gray_levels: usize,
) -> Result<FeatureRecord> {
    let glcm = build_glcm(image, displacement, gray_levels)?;
    let texture = TextureFeatures::extract(&glcm);
    let moments = MomentFeatures::extract(image)?;

    Ok(FeatureRecord {
        source: source.into(),
        texture,
        moments,
    })
}

/// Feature extractor bound to one displacement and gray level count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureExtractor {
    displacement: Displacement,
    gray_levels: usize,
}

impl FeatureExtractor {
    /// Create a new feature extractor.
    ///
    /// # Errors
    /// `EmptyGrayLevels` or `TooManyGrayLevels` when `gray_levels` is outside
    /// `[1, MAX_GRAY_LEVELS]`.
    pub fn new(displacement: Displacement, gray_levels: usize) -> Result<Self> {
        validate_gray_levels(gray_levels)?;
        Ok(Self {
            displacement,
            gray_levels,
        })
    }

    /// Displacement used for co-occurrence
    pub fn displacement(&self) -> Displacement {
        self.displacement
    }

    /// Number of gray levels
    pub fn gray_levels(&self) -> usize {
        self.gray_levels
    }

    /// Co-occurrence matrix of `image` at this extractor's displacement
    pub fn co_occurrence(&self, image: &GrayscaleMatrix) -> Result<CoOccurrenceMatrix> {
        build_glcm(image, self.displacement, self.gray_levels)
    }

    /// Extract the feature record of `image`
    pub fn extract(&self, source: impl Into<String>, image: &GrayscaleMatrix) -> Result<FeatureRecord> {
        let source = source.into();
        debug!(
            "Extracting features: source={}, shape={:?}, distance={}, angle={}",
            source,
            image.shape(),
            self.displacement.distance(),
            self.displacement.angle_degrees()
        );
        assemble(source, image, self.displacement, self.gray_levels)
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self {
            displacement: Displacement::default(),
            gray_levels: DEFAULT_GRAY_LEVELS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entropy_bias_bound, TextureError};

    #[test]
    fn test_known_record() {
        let image = GrayscaleMatrix::from_rows(&[[0u32, 0], [1, 1]]).unwrap();
        let record = assemble("known", &image, Displacement::default(), 2).unwrap();

        assert_eq!(record.source, "known");
        assert_eq!(record.texture.contrast, 0.0);
        assert!((record.texture.homogeneity - 1.0).abs() < 1e-12);
        assert!((record.texture.energy - 0.5).abs() < 1e-12);
        assert!((record.texture.entropy - 1.0).abs() <= entropy_bias_bound(2));
        assert_eq!(record.moments.median, 0.5);
        assert!((record.moments.variance - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_single_pixel_record() {
        let image = GrayscaleMatrix::from_rows(&[[200u32]]).unwrap();
        let record = FeatureExtractor::default().extract("dot", &image).unwrap();

        assert_eq!(record.texture, TextureFeatures::default());
        assert_eq!(record.moments.median, 200.0);
        assert!(!record.moments.shape_defined());
    }

    #[test]
    fn test_errors_propagate() {
        let image = GrayscaleMatrix::from_rows(&[[0u32, 300]]).unwrap();
        let err = FeatureExtractor::default().extract("bright", &image).unwrap_err();
        assert!(matches!(err, TextureError::IntensityOutOfRange { value: 300, .. }));
    }

    #[test]
    fn test_values_order() {
        let image = GrayscaleMatrix::from_rows(&[[10u32, 20, 30], [40, 50, 60]]).unwrap();
        let record = FeatureExtractor::default().extract("grid", &image).unwrap();
        let values = record.values();

        assert_eq!(values.len(), FEATURE_COUNT);
        for (idx, name) in FeatureRecord::FEATURE_NAMES.iter().enumerate() {
            assert_eq!(record.value(name), Some(values[idx]));
        }
        assert_eq!(record.value("median"), Some(35.0));
        assert_eq!(record.value("unknown"), None);
    }

    #[test]
    fn test_repeated_extraction_is_identical() {
        let image = GrayscaleMatrix::from_rows(&[[3u32, 9, 1], [7, 7, 2], [0, 4, 8]]).unwrap();
        let extractor = FeatureExtractor::new(Displacement::new(1, 45.0).unwrap(), 16).unwrap();
        let a = extractor.extract("a", &image).unwrap();
        let b = extractor.extract("a", &image).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_extractor_rejects_gray_level_extremes() {
        let displacement = Displacement::default();
        assert_eq!(
            FeatureExtractor::new(displacement, 0),
            Err(TextureError::EmptyGrayLevels)
        );
        assert!(matches!(
            FeatureExtractor::new(displacement, usize::MAX),
            Err(TextureError::TooManyGrayLevels { .. })
        ));
        assert!(matches!(
            FeatureExtractor::new(displacement, crate::MAX_GRAY_LEVELS + 1),
            Err(TextureError::TooManyGrayLevels { .. })
        ));
        assert_eq!(FeatureExtractor::new(displacement, 256), Ok(FeatureExtractor::default()));
    }

    #[test]
    fn test_co_occurrence_matches_builder() {
        let image = GrayscaleMatrix::from_rows(&[[0u32, 0], [1, 1]]).unwrap();
        let extractor = FeatureExtractor::new(Displacement::default(), 2).unwrap();
        let glcm = extractor.co_occurrence(&image).unwrap();
        assert_eq!(glcm, build_glcm(&image, Displacement::default(), 2).unwrap());
        assert_eq!(glcm.pair_count(), 2);
    }
}
