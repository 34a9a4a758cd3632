//! Error types for job ingestion

use thiserror::Error;

/// Errors that abort an ingestion. No partial results accompany any of them.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Transport failure or non-success status from the job source.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("unsupported payload shape: expected an object or array, got {0}")]
    UnsupportedShape(&'static str),

    #[error("job entry {index} is missing required title field")]
    MissingTitle { index: usize },

    #[error("duplicate job IDs detected: {}", .0.join(", "))]
    DuplicateIds(Vec<String>),
}

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;
