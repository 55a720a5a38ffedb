use std::path::PathBuf;
use thiserror::Error;

/// Faults reading or writing training files. A file that exists but cannot be
/// parsed is a deployment problem and is never treated as "no data".
#[derive(Error, Debug)]
pub enum TrainingError {
    #[error("Failed to access training file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Training file {path} is not valid JSON for the expected shape: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode training data: {0}")]
    Encode(#[from] serde_json::Error),
}
