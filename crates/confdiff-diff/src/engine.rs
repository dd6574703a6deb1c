//! The recursive structural comparator.
//!
//! Walks both trees in lock-step from the root:
//!
//! - two scalars are compared by exact type and value;
//! - two mappings are compared over the union of their keys, emitting an
//!   addition or removal (with the full subtree) for one-sided keys and
//!   recursing into shared ones;
//! - two sequences are aligned by index, recursing into the common prefix
//!   and emitting additions or removals for the tail of the longer one;
//! - any other pairing is a shape mismatch, reported as one change carrying
//!   both complete subtrees.

use confdiff_types::{Node, Path};
use tracing::debug;

use crate::report::{DiffEntry, DiffReport, ReportBuilder};

/// Compare two trees and return the classified, sorted differences.
///
/// The engine owns its [`ReportBuilder`] for the whole walk and consumes it
/// at the end, so it files entries through the crate-internal path that
/// skips the finalized check. The result is the same report that
/// `add_*` followed by [`ReportBuilder::finalize`] would produce for the
/// same entries.
pub fn diff(left: &Node, right: &Node) -> DiffReport {
    let mut builder = ReportBuilder::new();
    walk(left, right, &Path::root(), &mut builder);
    let report = builder.seal();

    let summary = report.summary();
    debug!(
        additions = summary.additions,
        removals = summary.removals,
        changes = summary.changes,
        "structural diff complete"
    );
    report
}

fn walk(left: &Node, right: &Node, path: &Path, out: &mut ReportBuilder) {
    match (left, right) {
        (Node::Scalar(l), Node::Scalar(r)) => {
            if l != r {
                out.push(change(left, right, path));
            }
        }
        (Node::Mapping(l), Node::Mapping(r)) => {
            for (key, left_child) in l {
                let child_path = path.key(key.as_str());
                match r.get(key) {
                    Some(right_child) => walk(left_child, right_child, &child_path, out),
                    None => out.push(DiffEntry::Removal {
                        left_path: child_path,
                        left_value: left_child.clone(),
                    }),
                }
            }
            for (key, right_child) in r {
                if !l.contains_key(key) {
                    out.push(DiffEntry::Addition {
                        right_path: path.key(key.as_str()),
                        right_value: right_child.clone(),
                    });
                }
            }
        }
        (Node::Sequence(l), Node::Sequence(r)) => {
            for (i, (left_item, right_item)) in l.iter().zip(r).enumerate() {
                walk(left_item, right_item, &path.index(i), out);
            }
            let common = l.len().min(r.len());
            for (i, item) in l.iter().enumerate().skip(common) {
                out.push(DiffEntry::Removal {
                    left_path: path.index(i),
                    left_value: item.clone(),
                });
            }
            for (i, item) in r.iter().enumerate().skip(common) {
                out.push(DiffEntry::Addition {
                    right_path: path.index(i),
                    right_value: item.clone(),
                });
            }
        }
        _ => out.push(change(left, right, path)),
    }
}

fn change(left: &Node, right: &Node, path: &Path) -> DiffEntry {
    DiffEntry::Change {
        left_path: path.clone(),
        left_value: left.clone(),
        right_path: path.clone(),
        right_value: right.clone(),
    }
}
