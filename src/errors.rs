//! Error types for the output stage
//!
//! A run either produces a complete set of artifacts or fails with the
//! record file or artifact path that triggered the failure.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Error types for output aggregation
#[derive(Debug, Error)]
pub enum OutputError {
    /// A stored page record is not a valid `PageRecord`
    #[error("Malformed page record in {}: {source}", path.display())]
    MalformedRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The dataset directory or one of its files could not be read
    #[error("Failed to read dataset entry {}: {source}", path.display())]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Flushing a batch to disk failed
    #[error("Failed to write artifact {}: {source}", path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration rejected at validation time
    #[error("Invalid output configuration: {0}")]
    InvalidConfig(String),

    /// HTML to Markdown conversion failed for a page body
    #[error("Markdown conversion failed for {url}: {message}")]
    Conversion { url: String, message: String },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A blocking render task panicked or timed out
    #[error("Render task failed: {0}")]
    TaskFailed(String),

    /// Record added after `finish()`
    #[error("Batch writer already finished")]
    WriterFinished,

    /// An earlier flush failed; the run produced no complete artifact set
    #[error("Batch writer failed earlier: {0}")]
    WriterFailed(String),
}

impl From<anyhow::Error> for OutputError {
    fn from(error: anyhow::Error) -> Self {
        // {:#} keeps the whole context chain
        OutputError::InvalidConfig(format!("{error:#}"))
    }
}

impl OutputError {
    /// Path of the record file or artifact involved, when there is one
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            OutputError::MalformedRecord { path, .. }
            | OutputError::DatasetRead { path, .. }
            | OutputError::ArtifactWrite { path, .. } => Some(path),
            _ => None,
        }
    }
}
