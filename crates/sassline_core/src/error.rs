use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the host pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The path cannot be tracked: missing, or outside every search root
    #[error("File not found: '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read '{path}': {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("No processor registered for '{id}' (needed by '{path}')")]
    UnknownProcessor { id: String, path: PathBuf },

    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },
}

impl PipelineError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PipelineError::NotFound(_))
    }
}
