//! Document loaders for confdiff.
//!
//! Turns JSON, YAML, TOML, and HOCON text into a canonical
//! [`Node`](confdiff_types::Node). The diff engine never parses anything
//! itself; this crate is the collaborator that feeds it.

pub mod error;
pub mod format;
pub mod load;

pub use error::{FormatError, FormatResult};
pub use format::Format;
pub use load::{load_file, parse_str};
