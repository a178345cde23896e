//! Apply unified diffs to a working tree.
//!
//! Two strategies with deterministic fallback: `git apply` as a subprocess
//! when the target is a git checkout and the caller allows it, otherwise an
//! in-process splice engine that rewrites files from the parsed hunks with
//! manual offset bookkeeping.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use stagehand_udiff::{DiffLine, DiffParser, FileDiff};

use crate::external;
use crate::outcome::{ApplyFailure, ApplyOptions, ApplyOutcome, ApplyStrategy};

/// Applier for unified diff text against a target directory.
pub struct PatchApplier;

impl PatchApplier {
    /// Apply `diff` to the tree rooted at `root`.
    ///
    /// Hunks within one file are applied strictly in order because each
    /// hunk's splice position depends on the net line drift of the hunks
    /// before it. The batch is not atomic: on failure, files already
    /// rewritten stay rewritten.
    pub fn apply(diff: &str, root: &Path, options: &ApplyOptions) -> ApplyOutcome {
        if options.prefer_external_tool && external::is_git_worktree(root) {
            match external::git_apply(diff, root) {
                Ok(()) => {
                    debug!("applied diff with git apply in {}", root.display());
                    return ApplyOutcome::Applied {
                        strategy: ApplyStrategy::External,
                    };
                }
                Err(err) => {
                    warn!("git apply failed, falling back to in-memory strategy: {err:#}");
                }
            }
        }
        Self::apply_in_memory(diff, root)
    }

    /// In-memory strategy: splice each hunk into the file's line array.
    fn apply_in_memory(diff: &str, root: &Path) -> ApplyOutcome {
        let doc = DiffParser::parse(diff);

        for file in &doc.files {
            let Some(rel) = target_path(file) else {
                warn!("skipping file block with no usable target path");
                continue;
            };
            let Some(abs) = resolve_under_root(root, &rel) else {
                return ApplyOutcome::Failed {
                    reason: ApplyFailure::UnsafePath { path: rel },
                };
            };
            if let Err(reason) = apply_file(file, &abs) {
                return ApplyOutcome::Failed { reason };
            }
        }

        ApplyOutcome::Applied {
            strategy: ApplyStrategy::InMemory,
        }
    }
}

/// Target path for a file block: the `+++ b/` path, or the `--- a/` header
/// line when the diff deletes the file (its `+++` side is `/dev/null`).
fn target_path(file: &FileDiff) -> Option<PathBuf> {
    if !file.path.is_empty() {
        return Some(PathBuf::from(&file.path));
    }
    for line in &file.header {
        if let Some(rest) = line.strip_prefix("--- a/") {
            let rest = rest.trim();
            if !rest.is_empty() {
                return Some(PathBuf::from(rest));
            }
        }
    }
    None
}

/// The diff chooses the file name; refuse anything that could step outside
/// the target tree.
fn resolve_under_root(root: &Path, rel: &Path) -> Option<PathBuf> {
    if rel.is_absolute() {
        return None;
    }
    for component in rel.components() {
        match component {
            Component::Normal(_) => {}
            _ => return None,
        }
    }
    Some(root.join(rel))
}

/// Rewrite one file by splicing its hunks, in order, into the line array.
fn apply_file(file: &FileDiff, path: &Path) -> Result<(), ApplyFailure> {
    let existing = match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        // Target absent, or a parent component is not a directory yet:
        // this is a new file
        Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => None,
        // An existing file we cannot read must not be clobbered
        Err(err) => {
            return Err(ApplyFailure::FileRead {
                path: path.to_path_buf(),
                message: err.to_string(),
            });
        }
    };
    let is_new = existing.is_none();
    let content = existing.unwrap_or_default();

    // A trailing newline yields a final empty element, which round-trips
    // through the join below.
    let mut lines: Vec<String> = if content.is_empty() {
        Vec::new()
    } else {
        content.split('\n').map(str::to_string).collect()
    };

    // Net line drift caused by the hunks applied so far
    let mut offset: isize = 0;
    for hunk in &file.hunks {
        let declared = hunk.old_start as isize - 1 + offset;
        let start = declared.clamp(0, lines.len() as isize) as usize;
        let end = (start + hunk.old_lines as usize).min(lines.len());

        let replacement: Vec<String> = hunk
            .lines
            .iter()
            .filter_map(|line| match line {
                DiffLine::Add { .. } | DiffLine::Context { .. } => {
                    Some(line.content().to_string())
                }
                DiffLine::Delete { .. } | DiffLine::Meta { .. } => None,
            })
            .collect();

        offset += replacement.len() as isize - hunk.old_lines as isize;
        lines.splice(start..end, replacement);
    }

    if is_new {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| ApplyFailure::FileWrite {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        }
    }

    debug!(
        "writing {} ({} lines{})",
        path.display(),
        lines.len(),
        if is_new { ", new file" } else { "" }
    );
    std::fs::write(path, lines.join("\n")).map_err(|err| ApplyFailure::FileWrite {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
