//! Text rendering of diff reports.
//!
//! Each entry prints as two lines, the left document in green and the right
//! document in red, followed by a blank line:
//!
//! ```text
//! left.conf: NOT PRESENT
//! right.conf: service.port=8080
//! ```

use std::fmt::Write;

use colored::Colorize;
use confdiff_diff::{DeltaLine, DiffEntry, DiffReport, Summary, TextDelta};
use confdiff_types::{Node, Path};

use crate::compare::DirComparison;

const NOT_PRESENT: &str = "NOT PRESENT";

fn path_label(path: &Path) -> String {
    if path.is_root() {
        "<root>".to_string()
    } else {
        path.render()
    }
}

fn side(path: Option<&Path>, value: Option<&Node>) -> String {
    match (path, value) {
        (Some(p), Some(v)) => format!("{}={}", path_label(p), v),
        _ => NOT_PRESENT.to_string(),
    }
}

/// Append the text form of `report` to `out`.
pub fn render_report(out: &mut String, report: &DiffReport, left_name: &str, right_name: &str) {
    for entry in report.entries() {
        let left = side(entry.left_path(), entry.left_value());
        let right = side(entry.right_path(), entry.right_value());
        let _ = writeln!(out, "{}", format!("{left_name}: {left}").green());
        let _ = writeln!(out, "{}", format!("{right_name}: {right}").red());

        if let DiffEntry::Change {
            left_value,
            right_value,
            ..
        } = entry
        {
            if let Some(delta) = TextDelta::for_values(left_value, right_value) {
                render_delta(out, &delta);
            }
        }
        out.push('\n');
    }
}

fn render_delta(out: &mut String, delta: &TextDelta) {
    for hunk in &delta.hunks {
        let header = format!(
            "@@ -{},{} +{},{} @@",
            hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
        );
        let _ = writeln!(out, "  {}", header.cyan());
        for line in &hunk.lines {
            let _ = match line {
                DeltaLine::Context(text) => writeln!(out, "   {}", text.dimmed()),
                DeltaLine::Removed(text) => writeln!(out, "  {}", format!("-{text}").green()),
                DeltaLine::Added(text) => writeln!(out, "  {}", format!("+{text}").red()),
            };
        }
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

pub fn render_summary(out: &mut String, summary: &Summary) {
    if summary.total() == 0 {
        let _ = writeln!(out, "{} No differences.", "✓".green().bold());
        return;
    }
    let _ = writeln!(
        out,
        "{}, {}, {}",
        plural(summary.additions, "addition").bold(),
        plural(summary.removals, "removal").bold(),
        plural(summary.changes, "change").bold(),
    );
}

/// Append the text form of a directory comparison to `out`.
pub fn render_dirs(out: &mut String, result: &DirComparison, left_root: &str, right_root: &str) {
    for path in &result.only_left {
        let _ = writeln!(out, "{} {}", format!("Only in {left_root}:").yellow(), path.display());
    }
    for path in &result.only_right {
        let _ = writeln!(out, "{} {}", format!("Only in {right_root}:").yellow(), path.display());
    }
    if !result.only_left.is_empty() || !result.only_right.is_empty() {
        out.push('\n');
    }

    let mut total = Summary::default();
    for file in &result.files {
        let summary = file.report.summary();
        total.additions += summary.additions;
        total.removals += summary.removals;
        total.changes += summary.changes;
        if file.report.is_empty() {
            continue;
        }
        let rel = file.path.display();
        let _ = writeln!(out, "{}", format!("=== {rel}").bold());
        render_report(
            out,
            &file.report,
            &format!("{left_root}/{rel}"),
            &format!("{right_root}/{rel}"),
        );
    }
    render_summary(out, &total);
}
