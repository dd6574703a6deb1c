use thiserror::Error;

use crate::path::Path;

/// Errors produced while building or guarding a tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A parsed value has no counterpart in the canonical tree.
    #[error("unsupported value kind `{kind}` at `{path}`")]
    UnsupportedValueKind { kind: String, path: Path },

    /// Two distinct source keys collapse onto the same string key.
    #[error("duplicate mapping key `{key}` at `{path}`")]
    DuplicateKey { key: String, path: Path },

    /// The tree exceeds a caller-imposed ceiling.
    #[error("tree exceeds {limit} limit: {actual} > {max}")]
    TreeTooLarge {
        limit: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Convenience alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
