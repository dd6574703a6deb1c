//! Structural diff engine for confdiff.
//!
//! Compares two canonical trees and produces a [`DiffReport`] classifying
//! every difference as an addition, a removal, or a change, each tagged with
//! its [`Path`](confdiff_types::Path).
//!
//! # Key Types
//!
//! - [`diff`] -- The comparator: `diff(&left, &right) -> DiffReport`
//! - [`DiffReport`] / [`DiffEntry`] -- Sorted, immutable result
//! - [`ReportBuilder`] -- Append-then-finalize accumulator behind a report
//! - [`TextDelta`] / [`DeltaHunk`] / [`DeltaLine`] -- Line-level delta of two multi-line strings
//!
//! # Sequence alignment
//!
//! Sequences are aligned by index only. Inserting an element at the front
//! of a list therefore shows up as a change at every following index plus
//! an addition at the end, not as a single insertion. There is no identity
//! key or edit-distance matching.

pub mod engine;
pub mod error;
pub mod report;
pub mod text_delta;

pub use engine::diff;
pub use error::{DiffError, DiffResult};
pub use report::{DiffEntry, DiffReport, ReportBuilder, Summary};
pub use text_delta::{diff_text, DeltaHunk, DeltaLine, TextDelta};
