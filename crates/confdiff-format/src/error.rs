//! Error types for the format crate.

use std::path::PathBuf;

use confdiff_types::TreeError;

/// Errors that can occur while loading a document.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid HOCON: {0}")]
    Hocon(#[from] hocon::Error),

    /// The parsed document does not fit the canonical tree.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// A YAML stream held more than one document where one was expected.
    #[error("expected a single document, found {0}")]
    MultipleDocuments(usize),

    /// The format could not be inferred from the file name.
    #[error("cannot infer format of {0}: use a .json, .yaml, .yml, .toml, or .conf extension")]
    UnknownExtension(PathBuf),

    #[error("unknown format name: {0}")]
    UnknownFormat(String),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for format results.
pub type FormatResult<T> = Result<T, FormatError>;
