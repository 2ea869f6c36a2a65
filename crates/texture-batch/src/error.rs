//! Batch Error Types

use std::path::PathBuf;
use texture_engine::TextureError;
use thiserror::Error;

/// Errors while loading, configuring or analyzing images
#[derive(Debug, Error)]
pub enum BatchError {
    /// Filesystem access failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not a decodable image
    #[error("failed to decode image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Image rejected by the texture engine
    #[error(transparent)]
    Texture(#[from] TextureError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
