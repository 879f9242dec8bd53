use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the game before the first frame.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("failed to load sprite {path}: {reason}")]
    Sprite { path: PathBuf, reason: String },
}
