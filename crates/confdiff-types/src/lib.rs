//! Canonical tree types for confdiff.
//!
//! Every comparison in confdiff operates on the format-agnostic tree defined
//! here. Parsers for concrete configuration languages convert their own value
//! graphs into a [`Node`]; the diff engine never sees anything else.
//!
//! # Key Types
//!
//! - [`Node`] -- Mapping, sequence, or scalar; immutable once built
//! - [`Scalar`] -- String, number, boolean, or null, compared exactly
//! - [`Path`] / [`PathSegment`] -- Location of a node inside a tree
//! - [`TreeLimits`] -- Caller-imposed depth and size ceilings

pub mod convert;
pub mod error;
pub mod limits;
pub mod node;
pub mod path;

pub use error::{TreeError, TreeResult};
pub use limits::TreeLimits;
pub use node::{Node, NodeKind, Scalar};
pub use path::{Path, PathSegment};
