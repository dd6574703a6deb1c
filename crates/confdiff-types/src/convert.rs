//! Conversions from parser value graphs into the canonical tree.
//!
//! JSON maps one-to-one. YAML, TOML, and HOCON carry kinds the canonical tree
//! does not have (tags, non-string keys, datetimes, non-finite floats,
//! unresolved values); those are
//! normalized where an obvious scalar form exists and rejected with
//! [`TreeError::UnsupportedValueKind`] otherwise.

use std::collections::BTreeMap;

use serde_json::Number;

use crate::error::{TreeError, TreeResult};
use crate::node::{Node, Scalar};
use crate::path::Path;

impl Node {
    /// Build a tree from a JSON value. Never fails.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => Node::Scalar(Scalar::Number(n.clone())),
            Value::String(s) => Node::Scalar(Scalar::String(s.clone())),
            Value::Array(items) => Node::Sequence(items.iter().map(Node::from_json).collect()),
            Value::Object(map) => Node::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), Node::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Build a tree from a YAML value.
    ///
    /// Scalar mapping keys (numbers, booleans, null) are stringified. Tagged
    /// values, container keys, and non-finite floats are rejected.
    pub fn from_yaml(value: &serde_yaml::Value) -> TreeResult<Self> {
        yaml_node(value, &Path::root())
    }

    /// Build a tree from a TOML value.
    ///
    /// Datetimes become their RFC 3339 string. Non-finite floats are rejected.
    pub fn from_toml(value: &toml::Value) -> TreeResult<Self> {
        toml_node(value, &Path::root())
    }

    /// Build a tree from a resolved HOCON document.
    ///
    /// Values the loader could not resolve are rejected.
    pub fn from_hocon(value: &hocon::Hocon) -> TreeResult<Self> {
        hocon_node(value, &Path::root())
    }
}

fn unsupported(kind: impl Into<String>, path: &Path) -> TreeError {
    TreeError::UnsupportedValueKind {
        kind: kind.into(),
        path: path.clone(),
    }
}

fn finite_float(f: f64, path: &Path) -> TreeResult<Number> {
    Number::from_f64(f).ok_or_else(|| unsupported(format!("non-finite float {f}"), path))
}

fn yaml_node(value: &serde_yaml::Value, path: &Path) -> TreeResult<Node> {
    use serde_yaml::Value;

    let node = match value {
        Value::Null => Node::Scalar(Scalar::Null),
        Value::Bool(b) => Node::Scalar(Scalar::Bool(*b)),
        Value::Number(n) => Node::Scalar(Scalar::Number(yaml_number(n, path)?)),
        Value::String(s) => Node::Scalar(Scalar::String(s.clone())),
        Value::Sequence(items) => Node::Sequence(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| yaml_node(item, &path.index(i)))
                .collect::<TreeResult<Vec<_>>>()?,
        ),
        Value::Mapping(map) => {
            let mut entries = BTreeMap::new();
            for (k, v) in map {
                let key = yaml_key(k, path)?;
                let child = yaml_node(v, &path.key(key.as_str()))?;
                if entries.insert(key.clone(), child).is_some() {
                    return Err(TreeError::DuplicateKey {
                        key,
                        path: path.clone(),
                    });
                }
            }
            Node::Mapping(entries)
        }
        Value::Tagged(tagged) => return Err(unsupported(format!("tagged {}", tagged.tag), path)),
    };
    Ok(node)
}

fn yaml_number(n: &serde_yaml::Number, path: &Path) -> TreeResult<Number> {
    if let Some(i) = n.as_i64() {
        Ok(Number::from(i))
    } else if let Some(u) = n.as_u64() {
        Ok(Number::from(u))
    } else {
        finite_float(n.as_f64().unwrap_or(f64::NAN), path)
    }
}

fn yaml_key(key: &serde_yaml::Value, path: &Path) -> TreeResult<String> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Sequence(_) => Err(unsupported("sequence as mapping key", path)),
        Value::Mapping(_) => Err(unsupported("mapping as mapping key", path)),
        Value::Tagged(tagged) => Err(unsupported(
            format!("tagged {} as mapping key", tagged.tag),
            path,
        )),
    }
}

fn toml_node(value: &toml::Value, path: &Path) -> TreeResult<Node> {
    use toml::Value;

    let node = match value {
        Value::String(s) => Node::Scalar(Scalar::String(s.clone())),
        Value::Integer(i) => Node::Scalar(Scalar::Number(Number::from(*i))),
        Value::Float(f) => Node::Scalar(Scalar::Number(finite_float(*f, path)?)),
        Value::Boolean(b) => Node::Scalar(Scalar::Bool(*b)),
        Value::Datetime(dt) => Node::Scalar(Scalar::String(dt.to_string())),
        Value::Array(items) => Node::Sequence(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| toml_node(item, &path.index(i)))
                .collect::<TreeResult<Vec<_>>>()?,
        ),
        Value::Table(table) => Node::Mapping(
            table
                .iter()
                .map(|(k, v)| -> TreeResult<(String, Node)> {
                    Ok((k.clone(), toml_node(v, &path.key(k.as_str()))?))
                })
                .collect::<TreeResult<BTreeMap<_, _>>>()?,
        ),
    };
    Ok(node)
}

fn hocon_node(value: &hocon::Hocon, path: &Path) -> TreeResult<Node> {
    use hocon::Hocon;

    let node = match value {
        Hocon::Null => Node::Scalar(Scalar::Null),
        Hocon::Boolean(b) => Node::Scalar(Scalar::Bool(*b)),
        Hocon::Integer(i) => Node::Scalar(Scalar::Number(Number::from(*i))),
        Hocon::Real(f) => Node::Scalar(Scalar::Number(finite_float(*f, path)?)),
        Hocon::String(s) => Node::Scalar(Scalar::String(s.clone())),
        Hocon::Array(items) => Node::Sequence(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| hocon_node(item, &path.index(i)))
                .collect::<TreeResult<Vec<_>>>()?,
        ),
        Hocon::Hash(map) => Node::Mapping(
            map.iter()
                .map(|(k, v)| -> TreeResult<(String, Node)> {
                    Ok((k.clone(), hocon_node(v, &path.key(k.as_str()))?))
                })
                .collect::<TreeResult<BTreeMap<_, _>>>()?,
        ),
        Hocon::BadValue(err) => {
            return Err(unsupported(format!("unresolved value ({err})"), path));
        }
    };
    Ok(node)
}
