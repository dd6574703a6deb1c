use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{SplitError, SplitResult};

/// One object of a manifest stream.
#[derive(Clone, Debug, PartialEq)]
pub struct Manifest {
    /// Position of the document in the stream, empty documents included.
    pub index: usize,
    pub name: String,
    pub kind: String,
    pub document: Value,
}

impl Manifest {
    /// Build a manifest from a parsed document.
    ///
    /// Fails with `MissingField` unless the document has a string `kind` and
    /// a string `metadata.name`.
    pub fn from_document(index: usize, document: Value) -> SplitResult<Self> {
        let kind = document
            .get("kind")
            .and_then(Value::as_str)
            .ok_or(SplitError::MissingField { index, field: "kind" })?
            .to_string();
        let name = document
            .get("metadata")
            .and_then(|m| m.get("name"))
            .and_then(Value::as_str)
            .ok_or(SplitError::MissingField {
                index,
                field: "metadata.name",
            })?
            .to_string();
        Ok(Self {
            index,
            name,
            kind,
            document,
        })
    }

    /// File name for this manifest: `{project-}{name}-{kind}.yaml`, lowercase.
    ///
    /// Path separators in the name are replaced so the file always lands in
    /// the output directory.
    pub fn file_name(&self, project: Option<&str>) -> String {
        let prefix = project
            .filter(|p| !p.is_empty())
            .map(|p| format!("{p}-"))
            .unwrap_or_default();
        let raw = format!("{prefix}{}-{}.yaml", self.name, self.kind).to_lowercase();
        raw.replace(['/', '\\'], "-")
    }

    pub fn to_yaml(&self) -> SplitResult<String> {
        Ok(serde_yaml::to_string(&self.document)?)
    }
}

/// Parse a multi-document YAML stream into manifests.
///
/// Null documents (blank sections between separators, common in bundles)
/// are skipped.
pub fn split_stream(text: &str) -> SplitResult<Vec<Manifest>> {
    let mut manifests = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let value = Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }
        manifests.push(Manifest::from_document(index, value)?);
    }
    Ok(manifests)
}
