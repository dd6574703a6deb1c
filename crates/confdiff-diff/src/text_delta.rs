//! Line-level delta between two multi-line string scalars.
//!
//! A change to an embedded script, certificate, or templated block is a
//! single [`DiffEntry::Change`](crate::DiffEntry) to the engine. For display
//! it is more useful to see which lines moved, so presentation code can ask
//! for a [`TextDelta`] built with the `similar` crate (Myers algorithm).

use confdiff_types::{Node, Scalar};
use similar::{ChangeTag, TextDiff};

/// Number of unchanged lines kept around each hunk.
const CONTEXT_LINES: usize = 3;

/// Hunks of changed lines between two strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextDelta {
    pub hunks: Vec<DeltaHunk>,
}

impl TextDelta {
    /// Returns `true` if the two strings were identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    pub fn additions(&self) -> usize {
        self.lines()
            .filter(|l| matches!(l, DeltaLine::Added(_)))
            .count()
    }

    pub fn deletions(&self) -> usize {
        self.lines()
            .filter(|l| matches!(l, DeltaLine::Removed(_)))
            .count()
    }

    fn lines(&self) -> impl Iterator<Item = &DeltaLine> {
        self.hunks.iter().flat_map(|h| &h.lines)
    }

    /// Delta for a change between two string scalars where at least one side
    /// spans several lines. `None` for anything else.
    pub fn for_values(old: &Node, new: &Node) -> Option<Self> {
        match (old, new) {
            (Node::Scalar(Scalar::String(a)), Node::Scalar(Scalar::String(b)))
                if a.contains('\n') || b.contains('\n') =>
            {
                Some(diff_text(a, b))
            }
            _ => None,
        }
    }
}

/// A contiguous region of changed lines with surrounding context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeltaHunk {
    /// First line of the hunk in the old text (1-based).
    pub old_start: usize,
    pub old_count: usize,
    /// First line of the hunk in the new text (1-based).
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<DeltaLine>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeltaLine {
    Context(String),
    Added(String),
    Removed(String),
}

/// Compute a line-by-line delta between two strings.
pub fn diff_text(old: &str, new: &str) -> TextDelta {
    if old == new {
        return TextDelta { hunks: Vec::new() };
    }

    let text_diff = TextDiff::from_lines(old, new);
    let mut hunks = Vec::new();

    for group in text_diff.grouped_ops(CONTEXT_LINES) {
        let Some(first) = group.first() else {
            continue;
        };
        let mut hunk = DeltaHunk {
            old_start: first.old_range().start + 1,
            old_count: 0,
            new_start: first.new_range().start + 1,
            new_count: 0,
            lines: Vec::new(),
        };

        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                match change.tag() {
                    ChangeTag::Equal => {
                        hunk.lines.push(DeltaLine::Context(text));
                        hunk.old_count += 1;
                        hunk.new_count += 1;
                    }
                    ChangeTag::Delete => {
                        hunk.lines.push(DeltaLine::Removed(text));
                        hunk.old_count += 1;
                    }
                    ChangeTag::Insert => {
                        hunk.lines.push(DeltaLine::Added(text));
                        hunk.new_count += 1;
                    }
                }
            }
        }
        hunks.push(hunk);
    }

    TextDelta { hunks }
}
