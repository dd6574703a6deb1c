use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};
use crate::node::Node;

/// Ceilings a caller may impose on a tree before comparing it.
///
/// The diff engine never checks these itself; they exist so that a caller
/// handling untrusted or generated documents can refuse pathological inputs
/// up front with [`TreeError::TreeTooLarge`]. `None` means unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeLimits {
    /// Maximum number of levels, see [`Node::depth`].
    pub max_depth: Option<usize>,
    /// Maximum number of nodes, see [`Node::node_count`].
    pub max_nodes: Option<usize>,
}

impl TreeLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_depth.is_none() && self.max_nodes.is_none()
    }

    /// Fail with `TreeTooLarge` if `node` exceeds either ceiling.
    pub fn check(&self, node: &Node) -> TreeResult<()> {
        if let Some(max) = self.max_depth {
            let actual = node.depth();
            if actual > max {
                return Err(TreeError::TreeTooLarge {
                    limit: "depth",
                    max,
                    actual,
                });
            }
        }
        if let Some(max) = self.max_nodes {
            let actual = node.node_count();
            if actual > max {
                return Err(TreeError::TreeTooLarge {
                    limit: "node count",
                    max,
                    actual,
                });
            }
        }
        Ok(())
    }
}
