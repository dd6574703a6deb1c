//! Manifest splitter.
//!
//! Decomposes a concatenated, `---`-separated YAML stream (a typical bundled
//! Kubernetes install manifest) into one file per object, named after the
//! object's `metadata.name` and `kind`.
//!
//! # Key Types
//!
//! - [`Manifest`] -- One named document of the stream
//! - [`split_stream`] -- Parse a stream into manifests, skipping empty documents
//! - [`write_manifests`] -- Write manifests to a directory, resolving name collisions

pub mod error;
pub mod manifest;
pub mod writer;

pub use error::{SplitError, SplitResult};
pub use manifest::{split_stream, Manifest};
pub use writer::write_manifests;
