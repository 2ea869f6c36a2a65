//! Analysis settings

use crate::BatchError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use texture_engine::{
    Displacement, FeatureExtractor, DEFAULT_ANGLE_DEGREES, DEFAULT_DISTANCE, DEFAULT_GRAY_LEVELS,
};
use tracing::info;

/// Prefix of environment variables overriding the configuration
pub const ENV_PREFIX: &str = "TEXTURE";

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Co-occurrence neighbor distance (pixels)
    pub distance: i64,

    /// Co-occurrence neighbor angle (degrees)
    pub angle_degrees: f64,

    /// Number of gray levels
    pub gray_levels: usize,

    /// File extensions picked up when scanning a directory
    pub extensions: Vec<String>,

    /// Analyze images of a batch on a thread pool
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            angle_degrees: DEFAULT_ANGLE_DEGREES,
            gray_levels: DEFAULT_GRAY_LEVELS,
            extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
            parallel: true,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration: defaults, then `path` if given, then
    /// `TEXTURE_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, BatchError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("extensions"),
            )
            .build()?
            .try_deserialize()?;

        info!("Loaded analysis config: {:?}", config);
        Ok(config)
    }

    /// Validated co-occurrence displacement
    pub fn displacement(&self) -> Result<Displacement, BatchError> {
        Ok(Displacement::new(self.distance, self.angle_degrees)?)
    }

    /// Feature extractor for this configuration
    pub fn extractor(&self) -> Result<FeatureExtractor, BatchError> {
        Ok(FeatureExtractor::new(self.displacement()?, self.gray_levels)?)
    }
}
