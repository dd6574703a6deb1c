//! The diff report and the builder that assembles it.
//!
//! A [`ReportBuilder`] accepts entries during a single comparison pass and is
//! then finalized into a [`DiffReport`], whose three entry lists are sorted
//! by path. A finalized builder rejects every further mutation.

use confdiff_types::{Node, Path};
use serde::Serialize;

use crate::error::{DiffError, DiffResult};

/// A single structural difference between two trees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiffEntry {
    /// The node exists only in the right tree.
    Addition { right_path: Path, right_value: Node },
    /// The node exists only in the left tree.
    Removal { left_path: Path, left_value: Node },
    /// The node exists on both sides with a different value or shape.
    Change {
        left_path: Path,
        left_value: Node,
        right_path: Path,
        right_value: Node,
    },
}

impl DiffEntry {
    pub fn left_path(&self) -> Option<&Path> {
        match self {
            Self::Addition { .. } => None,
            Self::Removal { left_path, .. } | Self::Change { left_path, .. } => Some(left_path),
        }
    }

    pub fn right_path(&self) -> Option<&Path> {
        match self {
            Self::Removal { .. } => None,
            Self::Addition { right_path, .. } | Self::Change { right_path, .. } => {
                Some(right_path)
            }
        }
    }

    pub fn left_value(&self) -> Option<&Node> {
        match self {
            Self::Addition { .. } => None,
            Self::Removal { left_value, .. } | Self::Change { left_value, .. } => Some(left_value),
        }
    }

    pub fn right_value(&self) -> Option<&Node> {
        match self {
            Self::Removal { .. } => None,
            Self::Addition { right_value, .. } | Self::Change { right_value, .. } => {
                Some(right_value)
            }
        }
    }

    /// The path the entry is sorted by: the right path for an addition,
    /// the left path otherwise.
    pub fn path(&self) -> &Path {
        match self {
            Self::Addition { right_path, .. } => right_path,
            Self::Removal { left_path, .. } | Self::Change { left_path, .. } => left_path,
        }
    }

    /// The same difference seen from the other side.
    pub fn mirror(&self) -> Self {
        match self.clone() {
            Self::Addition {
                right_path,
                right_value,
            } => Self::Removal {
                left_path: right_path,
                left_value: right_value,
            },
            Self::Removal {
                left_path,
                left_value,
            } => Self::Addition {
                right_path: left_path,
                right_value: left_value,
            },
            Self::Change {
                left_path,
                left_value,
                right_path,
                right_value,
            } => Self::Change {
                left_path: right_path,
                left_value: right_value,
                right_path: left_path,
                right_value: left_value,
            },
        }
    }
}

/// Entry counts per category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub additions: usize,
    pub removals: usize,
    pub changes: usize,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.additions + self.removals + self.changes
    }
}

/// The finalized result of comparing two trees.
///
/// Each list is sorted by [`DiffEntry::path`]; two comparisons of identical
/// inputs produce identical reports.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    additions: Vec<DiffEntry>,
    removals: Vec<DiffEntry>,
    changes: Vec<DiffEntry>,
}

impl DiffReport {
    pub fn additions(&self) -> &[DiffEntry] {
        &self.additions
    }

    pub fn removals(&self) -> &[DiffEntry] {
        &self.removals
    }

    pub fn changes(&self) -> &[DiffEntry] {
        &self.changes
    }

    /// Returns `true` if the two trees were equal.
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty() && self.changes.is_empty()
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.additions.len() + self.removals.len() + self.changes.len()
    }

    /// All entries: additions, then removals, then changes.
    pub fn entries(&self) -> impl Iterator<Item = &DiffEntry> {
        self.additions
            .iter()
            .chain(&self.removals)
            .chain(&self.changes)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            additions: self.additions.len(),
            removals: self.removals.len(),
            changes: self.changes.len(),
        }
    }

    /// The report of the reversed comparison: additions become removals,
    /// removals become additions, and changes swap sides.
    pub fn inverted(&self) -> Self {
        let mut builder = ReportBuilder::new();
        for entry in self.entries() {
            builder.push(entry.mirror());
        }
        builder.seal()
    }
}

/// Accumulates entries during one comparison pass.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    additions: Vec<DiffEntry>,
    removals: Vec<DiffEntry>,
    changes: Vec<DiffEntry>,
    finalized: bool,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn add_addition(&mut self, right_path: Path, right_value: Node) -> DiffResult<()> {
        self.ensure_open()?;
        self.push(DiffEntry::Addition {
            right_path,
            right_value,
        });
        Ok(())
    }

    pub fn add_removal(&mut self, left_path: Path, left_value: Node) -> DiffResult<()> {
        self.ensure_open()?;
        self.push(DiffEntry::Removal {
            left_path,
            left_value,
        });
        Ok(())
    }

    pub fn add_change(
        &mut self,
        left_path: Path,
        left_value: Node,
        right_path: Path,
        right_value: Node,
    ) -> DiffResult<()> {
        self.ensure_open()?;
        self.push(DiffEntry::Change {
            left_path,
            left_value,
            right_path,
            right_value,
        });
        Ok(())
    }

    /// Sort the accumulated entries and hand them out as a report.
    ///
    /// The builder stays behind in the finalized state: any later call to a
    /// mutator or to `finalize` fails with `ReportAlreadyFinalized`.
    pub fn finalize(&mut self) -> DiffResult<DiffReport> {
        self.ensure_open()?;
        self.finalized = true;
        Ok(sorted_report(
            std::mem::take(&mut self.additions),
            std::mem::take(&mut self.removals),
            std::mem::take(&mut self.changes),
        ))
    }

    fn ensure_open(&self) -> DiffResult<()> {
        if self.finalized {
            return Err(DiffError::ReportAlreadyFinalized);
        }
        Ok(())
    }

    /// File an entry under its category without the finalized check. Only
    /// reachable from within the crate, where the builder is never shared.
    pub(crate) fn push(&mut self, entry: DiffEntry) {
        match entry {
            DiffEntry::Addition { .. } => self.additions.push(entry),
            DiffEntry::Removal { .. } => self.removals.push(entry),
            DiffEntry::Change { .. } => self.changes.push(entry),
        }
    }

    /// Consuming counterpart of `finalize` for a builder owned outright.
    pub(crate) fn seal(self) -> DiffReport {
        sorted_report(self.additions, self.removals, self.changes)
    }
}

fn sorted_report(
    mut additions: Vec<DiffEntry>,
    mut removals: Vec<DiffEntry>,
    mut changes: Vec<DiffEntry>,
) -> DiffReport {
    for list in [&mut additions, &mut removals, &mut changes] {
        list.sort_by(|a, b| a.path().cmp(b.path()));
    }
    DiffReport {
        additions,
        removals,
        changes,
    }
}
