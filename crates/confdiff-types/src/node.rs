use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Number;

use crate::path::{Path, PathSegment};

/// A primitive value, compared by exact type and value.
///
/// There is no coercion: the string `"1"`, the integer `1`, and the float
/// `1.0` are three different scalars.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Scalar {
    /// Name of the scalar's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// The three node shapes, without their contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Scalar,
    Mapping,
    Sequence,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Mapping => write!(f, "mapping"),
            Self::Sequence => write!(f, "sequence"),
        }
    }
}

/// A node of the canonical configuration tree.
///
/// Mapping entries are kept ordered by key so that iteration, and anything
/// derived from it, is deterministic regardless of source key order.
/// A `Node` is never mutated after construction; every operation in this
/// workspace takes it by shared reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Scalar(Scalar),
    Mapping(BTreeMap<String, Node>),
    Sequence(Vec<Node>),
}

impl Node {
    pub fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Scalar(_) => NodeKind::Scalar,
            Self::Mapping(_) => NodeKind::Mapping,
            Self::Sequence(_) => NodeKind::Sequence,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Node>> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Follow `path` from this node.
    ///
    /// Returns `None` if any segment does not exist, or if a key segment
    /// meets a sequence (or an index segment meets a mapping).
    pub fn get(&self, path: &Path) -> Option<&Node> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| match (node, segment) {
                (Self::Mapping(map), PathSegment::Key(key)) => map.get(key),
                (Self::Sequence(items), PathSegment::Index(i)) => items.get(*i),
                _ => None,
            })
    }

    /// Number of levels in the tree. A scalar or an empty container is 1.
    pub fn depth(&self) -> usize {
        let children = match self {
            Self::Scalar(_) => return 1,
            Self::Mapping(map) => map.values().map(Node::depth).max(),
            Self::Sequence(items) => items.iter().map(Node::depth).max(),
        };
        1 + children.unwrap_or(0)
    }

    /// Total number of nodes, this one included.
    pub fn node_count(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Mapping(map) => 1 + map.values().map(Node::node_count).sum::<usize>(),
            Self::Sequence(items) => 1 + items.iter().map(Node::node_count).sum::<usize>(),
        }
    }
}

/// Compact JSON rendering of the node.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl From<Scalar> for Node {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Self::Scalar(Scalar::Bool(b))
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Self {
        Self::Scalar(Scalar::Number(n.into()))
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Scalar(Scalar::String(s))
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::Sequence(items)
    }
}

impl From<BTreeMap<String, Node>> for Node {
    fn from(map: BTreeMap<String, Node>) -> Self {
        Self::Mapping(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exact_scalar_equality() {
        assert_ne!(Node::from(1), Node::from("1"));
        assert_ne!(Node::from_json(&json!(1)), Node::from_json(&json!(1.0)));
        assert_ne!(Node::null(), Node::from(false));
        assert_eq!(Node::from("v"), Node::from("v".to_string()));
    }

    #[test]
    fn kind_reports_shape() {
        assert_eq!(Node::from(true).kind(), NodeKind::Scalar);
        assert_eq!(Node::from_json(&json!({})).kind(), NodeKind::Mapping);
        assert_eq!(Node::from_json(&json!([])).kind(), NodeKind::Sequence);
    }

    #[test]
    fn get_follows_keys_and_indices() {
        let node = Node::from_json(&json!({"service": {"ports": [{"name": "http"}]}}));
        let path = Path::root().key("service").key("ports").index(0).key("name");
        assert_eq!(node.get(&path), Some(&Node::from("http")));
        assert_eq!(node.get(&Path::root()), Some(&node));
    }

    #[test]
    fn get_rejects_mismatched_segments() {
        let node = Node::from_json(&json!({"list": [1, 2], "map": {"0": true}}));
        assert_eq!(node.get(&Path::root().key("list").key("0")), None);
        assert_eq!(node.get(&Path::root().key("map").index(0)), None);
        assert_eq!(node.get(&Path::root().key("list").index(5)), None);
        assert_eq!(
            node.get(&Path::root().key("map").key("0")),
            Some(&Node::from(true))
        );
    }

    #[test]
    fn depth_and_count() {
        let node = Node::from_json(&json!({"a": {"b": [1, 2]}, "c": 3}));
        assert_eq!(node.depth(), 4);
        assert_eq!(node.node_count(), 6);
        assert_eq!(Node::from_json(&json!({})).depth(), 1);
        assert_eq!(Node::from(1).node_count(), 1);
    }

    #[test]
    fn display_is_compact_json() {
        let node = Node::from_json(&json!({"b": [1, "x"], "a": null}));
        assert_eq!(node.to_string(), r#"{"a":null,"b":[1,"x"]}"#);
    }

    #[test]
    fn scalar_type_names() {
        assert_eq!(Scalar::Null.type_name(), "null");
        assert_eq!(Scalar::String("x".into()).as_str(), Some("x"));
        assert_eq!(Scalar::Bool(true).as_str(), None);
    }
}
