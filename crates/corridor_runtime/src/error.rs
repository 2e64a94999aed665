//! Runtime error types

use corridor_section::RepositoryError;
use corridor_streaming::{ConfigError, StreamError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up or running a session
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Failed to read config '{}': {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config '{}': {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value '{value}' for {var}")]
    InvalidOverride { var: &'static str, value: String },

    #[error("Agent speed must be positive, got {0}")]
    InvalidAgentSpeed(f32),

    #[error("Invalid streaming config: {0}")]
    Streaming(#[from] ConfigError),

    #[error("Failed to enumerate anomaly sections: {0}")]
    Sections(#[from] RepositoryError),

    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
