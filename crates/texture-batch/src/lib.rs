//! Texture Batch Processing
//!
//! Drives the texture engine over image files:
//! - Layered configuration (defaults, file, environment)
//! - Image decoding to 8-bit grayscale
//! - Directory batches that log and skip unreadable images
//! - Per-feature summaries comparing two image populations

mod batch;
mod compare;
mod error;
mod loader;
mod settings;

pub use batch::{BatchFailure, BatchProcessor, BatchReport};
pub use compare::{
    compare_populations, compare_reports, summarize, ComparisonReport, FeatureComparison,
    FeatureSummary, PopulationOutcome,
};
pub use error::BatchError;
pub use loader::{has_extension, load_grayscale, scan_directory, to_grayscale};
pub use settings::{AnalysisConfig, ENV_PREFIX};
