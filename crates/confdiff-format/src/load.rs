use std::path::Path;

use confdiff_types::Node;
use hocon::HoconLoader;
use serde::Deserialize;
use tracing::debug;

use crate::error::{FormatError, FormatResult};
use crate::format::Format;

/// Parse a single document of the given format into a tree.
pub fn parse_str(format: Format, text: &str) -> FormatResult<Node> {
    match format {
        Format::Json => {
            let value: serde_json::Value = serde_json::from_str(text)?;
            Ok(Node::from_json(&value))
        }
        Format::Yaml => parse_yaml(text),
        Format::Toml => {
            let value: toml::Value = toml::from_str(text)?;
            Ok(Node::from_toml(&value)?)
        }
        Format::Hocon => {
            let value = HoconLoader::new().load_str(text)?.hocon()?;
            Ok(Node::from_hocon(&value)?)
        }
    }
}

/// An empty stream is a null document; more than one document is an error.
/// Merge keys (`<<: *anchor`) are expanded before conversion.
fn parse_yaml(text: &str) -> FormatResult<Node> {
    if text.trim().is_empty() {
        return Ok(Node::null());
    }
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let mut value = serde_yaml::Value::deserialize(document)?;
        value.apply_merge()?;
        documents.push(value);
    }
    match documents.as_slice() {
        [] => Ok(Node::null()),
        [single] => Ok(Node::from_yaml(single)?),
        many => Err(FormatError::MultipleDocuments(many.len())),
    }
}

/// Read and parse a file.
///
/// With `format` unset, the format is inferred from the extension.
pub fn load_file(path: &Path, format: Option<Format>) -> FormatResult<Node> {
    let format = match format.or_else(|| Format::from_path(path)) {
        Some(f) => f,
        None => return Err(FormatError::UnknownExtension(path.to_path_buf())),
    };
    let text = std::fs::read_to_string(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), %format, bytes = text.len(), "loading document");
    parse_str(format, &text)
}
