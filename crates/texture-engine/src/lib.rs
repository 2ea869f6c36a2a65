//! Texture Feature Engine
//!
//! Builds gray-level co-occurrence matrices (GLCM) from grayscale images and
//! derives texture and intensity-distribution features from them:
//! - Co-occurrence construction for a pixel displacement (distance, angle)
//! - Contrast, homogeneity, energy and entropy of a normalized GLCM
//! - Median, variance, skewness and excess kurtosis of the intensities
//!
//! Every operation is a pure function over immutable inputs.

mod error;
mod glcm;
mod grayscale;
mod moments;
mod record;
mod texture;

pub use error::TextureError;
pub use glcm::{build_glcm, CoOccurrenceMatrix, Displacement, DEFAULT_ANGLE_DEGREES, DEFAULT_DISTANCE};
pub use grayscale::{validate_gray_levels, GrayscaleMatrix, DEFAULT_GRAY_LEVELS, MAX_GRAY_LEVELS};
pub use moments::MomentFeatures;
pub use record::{assemble, FeatureExtractor, FeatureRecord, FEATURE_COUNT};
pub use texture::{entropy_bias_bound, TextureFeatures, ENTROPY_EPSILON};

/// Result alias for texture computations
pub type Result<T> = std::result::Result<T, TextureError>;
