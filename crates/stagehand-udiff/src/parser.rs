//! Parser for unified diff text into a reviewable document.

use tracing::debug;

use crate::model::{DiffDocument, DiffLine, FileDiff, Hunk};

/// Parser for the conventional `diff --git` unified diff grammar.
///
/// Parsing never fails: unrecognized lines inside a file block become Meta
/// lines, and lines before the first file marker are skipped. Two parses of
/// the same text produce structurally identical documents.
pub struct DiffParser;

impl DiffParser {
    /// Parse `text` into a [`DiffDocument`] with every change line accepted.
    pub fn parse(text: &str) -> DiffDocument {
        let mut doc = DiffDocument {
            trailing_newline: text.ends_with('\n'),
            ..DiffDocument::default()
        };
        let mut current_file: Option<FileDiff> = None;
        let mut current_hunk: Option<Hunk> = None;
        // Running line cursors, reseeded from each hunk header
        let mut old_cursor = 0u32;
        let mut new_cursor = 0u32;

        for line in split_lines(text) {
            if line.starts_with("diff --git ") {
                if let Some(mut file) = current_file.take() {
                    if let Some(hunk) = current_hunk.take() {
                        file.hunks.push(hunk);
                    }
                    doc.files.push(file);
                }
                current_file = Some(FileDiff {
                    header: vec![line.to_string()],
                    path: String::new(),
                    hunks: Vec::new(),
                });
                continue;
            }

            let Some(file) = current_file.as_mut() else {
                debug!("skipping line outside any file block: {line:?}");
                continue;
            };

            if let Some(parsed) = parse_hunk_header(line) {
                if let Some(hunk) = current_hunk.take() {
                    file.hunks.push(hunk);
                }
                old_cursor = parsed.old_start;
                new_cursor = parsed.new_start;
                current_hunk = Some(Hunk {
                    header: line.to_string(),
                    old_start: parsed.old_start,
                    old_lines: parsed.old_lines,
                    new_start: parsed.new_start,
                    new_lines: parsed.new_lines,
                    section: parsed.section,
                    lines: Vec::new(),
                });
                continue;
            }

            match current_hunk.as_mut() {
                None => {
                    // Still in the file preamble
                    if let Some(rest) = line.strip_prefix("+++ b/") {
                        file.path = rest.trim().to_string();
                    }
                    file.header.push(line.to_string());
                }
                Some(hunk) => {
                    let diff_line = match line.as_bytes().first() {
                        Some(b'+') => {
                            let parsed = DiffLine::Add {
                                text: line.to_string(),
                                new_line: new_cursor,
                                accepted: true,
                            };
                            new_cursor += 1;
                            parsed
                        }
                        Some(b'-') => {
                            let parsed = DiffLine::Delete {
                                text: line.to_string(),
                                old_line: old_cursor,
                                accepted: true,
                            };
                            old_cursor += 1;
                            parsed
                        }
                        Some(b' ') => {
                            let parsed = DiffLine::Context {
                                text: line.to_string(),
                                old_line: old_cursor,
                                new_line: new_cursor,
                            };
                            old_cursor += 1;
                            new_cursor += 1;
                            parsed
                        }
                        _ => DiffLine::Meta {
                            text: line.to_string(),
                        },
                    };
                    hunk.lines.push(diff_line);
                }
            }
        }

        if let Some(mut file) = current_file.take() {
            if let Some(hunk) = current_hunk.take() {
                file.hunks.push(hunk);
            }
            doc.files.push(file);
        }

        doc
    }
}

/// Split on `'\n'` only, so a trailing `'\r'` stays in the line text and
/// CRLF payloads survive the round trip. A final `'\n'` is a terminator,
/// not an empty trailing line.
fn split_lines(text: &str) -> std::str::Split<'_, char> {
    text.strip_suffix('\n').unwrap_or(text).split('\n')
}

struct HunkHeader {
    old_start: u32,
    old_lines: u32,
    new_start: u32,
    new_lines: u32,
    section: String,
}

/// Parse a `@@ -N[,M] +N[,M] @@ [section]` header, or None if the line is
/// not a well-formed hunk header (it then degrades to a Meta line).
fn parse_hunk_header(line: &str) -> Option<HunkHeader> {
    let rest = line.strip_prefix("@@ -")?;
    let (ranges, trailer) = rest.split_once(" @@")?;
    let (old, new) = ranges.split_once(" +")?;
    let (old_start, old_lines) = parse_range(old)?;
    let (new_start, new_lines) = parse_range(new)?;
    Some(HunkHeader {
        old_start,
        old_lines,
        new_start,
        new_lines,
        section: trailer.trim().to_string(),
    })
}

/// Parse `N` or `N,M`; the count defaults to 1 when omitted or empty.
fn parse_range(range: &str) -> Option<(u32, u32)> {
    match range.split_once(',') {
        Some((start, count)) => {
            let start = start.parse().ok()?;
            let count = if count.is_empty() {
                1
            } else {
                count.parse().ok()?
            };
            Some((start, count))
        }
        None => Some((range.parse().ok()?, 1)),
    }
}
