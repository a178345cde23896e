//! Structured model for a unified diff under review.
//!
//! A `DiffDocument` is built fresh by the parser for each review session and
//! lives only as long as that session. The types are serde-serializable
//! because the review model is shared with the IDE front end.

use serde::{Deserialize, Serialize};

/// One line of a hunk, tagged by its leading marker character.
///
/// `text` keeps the raw line including the marker so reconstruction can
/// round-trip the input byte for byte; use [`DiffLine::content`] for the
/// payload without the marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DiffLine {
    /// Added line (`+` prefix), numbered on the new side.
    Add {
        text: String,
        new_line: u32,
        accepted: bool,
    },
    /// Deleted line (`-` prefix), numbered on the old side.
    Delete {
        text: String,
        old_line: u32,
        accepted: bool,
    },
    /// Unchanged line (space prefix), numbered on both sides. Always kept.
    Context {
        text: String,
        old_line: u32,
        new_line: u32,
    },
    /// Anything else inside a hunk, e.g. `\ No newline at end of file`.
    /// Always kept, advances no line cursor.
    Meta { text: String },
}

impl DiffLine {
    /// Raw line text, including the leading marker character.
    pub fn raw(&self) -> &str {
        match self {
            DiffLine::Add { text, .. }
            | DiffLine::Delete { text, .. }
            | DiffLine::Context { text, .. }
            | DiffLine::Meta { text } => text,
        }
    }

    /// Line payload with the leading marker stripped.
    ///
    /// Meta lines carry no marker; their text is returned unchanged.
    pub fn content(&self) -> &str {
        match self {
            DiffLine::Add { text, .. }
            | DiffLine::Delete { text, .. }
            | DiffLine::Context { text, .. } => text.get(1..).unwrap_or(""),
            DiffLine::Meta { text } => text,
        }
    }

    /// Whether this line survives reconstruction in its current state.
    ///
    /// Context and Meta lines are not filterable and always survive.
    pub fn is_accepted(&self) -> bool {
        match self {
            DiffLine::Add { accepted, .. } | DiffLine::Delete { accepted, .. } => *accepted,
            DiffLine::Context { .. } | DiffLine::Meta { .. } => true,
        }
    }
}

/// A contiguous block of changes with its declared old/new position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    /// Raw `@@ ... @@` header line, kept for diagnostics.
    pub header: String,
    /// Start line on the old side, from the `-N[,M]` range.
    pub old_start: u32,
    /// Declared line count on the old side, defaulting to 1 when omitted.
    pub old_lines: u32,
    /// Start line on the new side, from the `+N[,M]` range.
    pub new_start: u32,
    /// Declared line count on the new side, defaulting to 1 when omitted.
    pub new_lines: u32,
    /// Function context after the closing `@@`, empty when absent.
    pub section: String,
    pub lines: Vec<DiffLine>,
}

/// All changes to a single file, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiff {
    /// Raw preamble lines (`diff --git`, `index`, `---`, `+++`, mode lines)
    /// in their original order.
    pub header: Vec<String>,
    /// Target-side path from the `+++ b/<path>` line; empty when absent.
    pub path: String,
    pub hunks: Vec<Hunk>,
}

impl FileDiff {
    /// Count this file's change lines, split by acceptance state.
    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for hunk in &self.hunks {
            for line in &hunk.lines {
                match line {
                    DiffLine::Add { accepted, .. } => {
                        stats.additions += 1;
                        if *accepted {
                            stats.accepted_additions += 1;
                        }
                    }
                    DiffLine::Delete { accepted, .. } => {
                        stats.deletions += 1;
                        if *accepted {
                            stats.accepted_deletions += 1;
                        }
                    }
                    DiffLine::Context { .. } | DiffLine::Meta { .. } => {}
                }
            }
        }
        stats
    }
}

/// An ordered set of file diffs parsed from one unified diff text.
///
/// File order matches the order of appearance in the source text and is
/// preserved through review and reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffDocument {
    pub files: Vec<FileDiff>,
    /// Whether the source text ended with a newline. Reconstruction mirrors
    /// this so round-trips stay byte-exact.
    pub trailing_newline: bool,
}

impl Default for DiffDocument {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            trailing_newline: true,
        }
    }
}

impl DiffDocument {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Aggregate change-line counts across all files.
    pub fn stats(&self) -> DiffStats {
        let mut total = DiffStats::default();
        for file in &self.files {
            let stats = file.stats();
            total.additions += stats.additions;
            total.deletions += stats.deletions;
            total.accepted_additions += stats.accepted_additions;
            total.accepted_deletions += stats.accepted_deletions;
        }
        total
    }
}

/// Change-line counts for a file or document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffStats {
    pub additions: u32,
    pub deletions: u32,
    pub accepted_additions: u32,
    pub accepted_deletions: u32,
}
