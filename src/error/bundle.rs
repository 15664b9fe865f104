/// Errors raised while talking to the external bundler
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Failed to start bundler '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Bundler exited with {status}: {stderr}")]
    Rejected { status: String, stderr: String },
    #[error("Failed to write bundle to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
    #[error("Bundle task aborted: {0}")]
    Join(String),
}

impl BundleError {
    /// Create a new Rejected error
    pub fn rejected(status: impl ToString, stderr: impl Into<String>) -> Self {
        Self::Rejected {
            status: status.to_string(),
            stderr: stderr.into(),
        }
    }
}

/// Result type alias for bundler operations
pub type BundleResult<T> = Result<T, BundleError>;
