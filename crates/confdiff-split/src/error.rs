//! Error types for the split crate.

use std::path::PathBuf;

/// Errors that can occur while splitting a manifest stream.
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A non-empty document lacks a field needed to name its file.
    #[error("document {index} has no string `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for split results.
pub type SplitResult<T> = Result<T, SplitError>;
