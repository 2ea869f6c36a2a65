//! Texture Detection CLI support
//!
//! Logging setup, configuration overrides and plain-text report rendering
//! for the `texture-detect` binary.

pub mod output;

use std::path::Path;
use texture_batch::{AnalysisConfig, BatchError};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Command-line overrides applied on top of the loaded configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub distance: Option<i64>,
    pub angle_degrees: Option<f64>,
    pub gray_levels: Option<usize>,
    pub sequential: bool,
}

/// Initialize logging on stderr; DEBUG when `verbose`, INFO otherwise
pub fn init_logging(verbose: bool) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}

/// Load configuration from `path` and the environment, then apply `overrides`
pub fn resolve_config(path: Option<&Path>, overrides: Overrides) -> Result<AnalysisConfig, BatchError> {
    let config = AnalysisConfig::load(path)?;
    Ok(apply_overrides(config, overrides))
}

fn apply_overrides(mut config: AnalysisConfig, overrides: Overrides) -> AnalysisConfig {
    if let Some(distance) = overrides.distance {
        config.distance = distance;
    }
    if let Some(angle) = overrides.angle_degrees {
        config.angle_degrees = angle;
    }
    if let Some(levels) = overrides.gray_levels {
        config.gray_levels = levels;
    }
    if overrides.sequential {
        config.parallel = false;
    }
    config
}
