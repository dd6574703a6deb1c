//! File and directory comparison on top of the diff engine.
//!
//! Directory mode pairs files by their path relative to each root. Only
//! files with a recognized extension take part. Common pairs are split into
//! contiguous chunks, one per worker, with at most one worker per available
//! core.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use confdiff_diff::{diff, DiffReport};
use confdiff_format::{load_file, Format};
use confdiff_types::{Node, TreeLimits};
use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;

/// How to load each side of a comparison.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadOptions {
    pub left_format: Option<Format>,
    pub right_format: Option<Format>,
    pub limits: TreeLimits,
}

/// Result of comparing two directories.
#[derive(Debug, Default, Serialize)]
pub struct DirComparison {
    pub only_left: Vec<PathBuf>,
    pub only_right: Vec<PathBuf>,
    pub files: Vec<FileDiff>,
}

impl DirComparison {
    pub fn has_differences(&self) -> bool {
        !self.only_left.is_empty()
            || !self.only_right.is_empty()
            || self.files.iter().any(|f| !f.report.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct FileDiff {
    pub path: PathBuf,
    pub report: DiffReport,
}

fn load_guarded(path: &Path, format: Option<Format>, limits: &TreeLimits) -> anyhow::Result<Node> {
    let node = load_file(path, format).with_context(|| format!("loading {}", path.display()))?;
    limits
        .check(&node)
        .with_context(|| format!("refusing {}", path.display()))?;
    Ok(node)
}

/// Load both files, apply the limits, and diff them.
pub fn compare_files(left: &Path, right: &Path, opts: &LoadOptions) -> anyhow::Result<DiffReport> {
    let left_tree = load_guarded(left, opts.left_format, &opts.limits)?;
    let right_tree = load_guarded(right, opts.right_format, &opts.limits)?;
    Ok(diff(&left_tree, &right_tree))
}

/// Relative paths of every loadable file under `root`, sorted.
fn collect_files(root: &Path) -> anyhow::Result<BTreeSet<PathBuf>> {
    let mut files = BTreeSet::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if !entry.file_type().is_file() || Format::from_path(entry.path()).is_none() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("{} is outside {}", entry.path().display(), root.display()))?;
        files.insert(relative.to_path_buf());
    }
    Ok(files)
}

/// Number of worker threads for `pairs` file pairs: never more than the
/// available parallelism, never more than the pairs, and at least one.
fn worker_count(pairs: usize) -> usize {
    let cores = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    cores.min(pairs).max(1)
}

/// Compare two directory trees of configuration files.
///
/// Formats are always inferred from extensions; `opts.limits` applies to
/// every file.
pub fn compare_dirs(
    left: &Path,
    right: &Path,
    opts: &LoadOptions,
) -> anyhow::Result<DirComparison> {
    let left_files = collect_files(left)?;
    let right_files = collect_files(right)?;
    debug!(left = left_files.len(), right = right_files.len(), "collected files");

    let only_left = left_files.difference(&right_files).cloned().collect();
    let only_right = right_files.difference(&left_files).cloned().collect();
    let common: Vec<&PathBuf> = left_files.intersection(&right_files).collect();

    let per_file = LoadOptions {
        left_format: None,
        right_format: None,
        limits: opts.limits,
    };
    let workers = worker_count(common.len());
    debug!(pairs = common.len(), workers, "comparing common files");

    let compare_one = |relative: &PathBuf| -> anyhow::Result<FileDiff> {
        let report = compare_files(&left.join(relative), &right.join(relative), &per_file)?;
        Ok(FileDiff {
            path: relative.to_path_buf(),
            report,
        })
    };
    let chunk_size = common.len().div_ceil(workers).max(1);
    let results = std::thread::scope(|s| -> anyhow::Result<Vec<anyhow::Result<FileDiff>>> {
        let mut handles = Vec::with_capacity(workers);
        for (i, chunk) in common.chunks(chunk_size).enumerate() {
            let compare_one = &compare_one;
            let handle = std::thread::Builder::new()
                .name(format!("confdiff-worker-{i}"))
                .spawn_scoped(s, move || -> Vec<anyhow::Result<FileDiff>> {
                    chunk.iter().copied().map(compare_one).collect()
                })
                .context("spawning comparison worker")?;
            handles.push(handle);
        }
        let mut results = Vec::with_capacity(common.len());
        for handle in handles {
            match handle.join() {
                Ok(chunk) => results.extend(chunk),
                Err(_) => results.push(Err(anyhow!("comparison worker panicked"))),
            }
        }
        Ok(results)
    })?;

    Ok(DirComparison {
        only_left,
        only_right,
        files: results.into_iter().collect::<anyhow::Result<Vec<_>>>()?,
    })
}
