//! Reconstruct unified diff text from the surviving lines of a document.

use crate::model::{DiffDocument, DiffLine, Hunk};

/// Serializer from a reviewed [`DiffDocument`] back to unified diff text.
pub struct DiffBuilder;

impl DiffBuilder {
    /// Build the accepted portion of `doc` as unified diff text.
    ///
    /// Context and Meta lines are always kept; Add/Delete lines are kept
    /// only while accepted. A hunk whose Add/Delete lines were all rejected
    /// contributes no change and is dropped, and a file with no surviving
    /// hunks is omitted entirely. Hunk counts are recomputed from the kept
    /// lines, but `old_start`/`new_start` are copied unchanged from the
    /// original even when earlier drops in the same file shift the real
    /// offsets: downstream tooling matches hunks against the original
    /// positions, so the starts must not be renumbered here.
    ///
    /// The output is a pure function of the document's acceptance state and
    /// ends with a trailing newline exactly when the parsed source did.
    pub fn build(doc: &DiffDocument) -> String {
        let mut out: Vec<String> = Vec::new();

        for file in &doc.files {
            let mut blocks: Vec<Vec<String>> = Vec::new();
            for hunk in &file.hunks {
                if let Some(block) = build_hunk(hunk) {
                    blocks.push(block);
                }
            }
            if blocks.is_empty() {
                continue;
            }
            out.extend(file.header.iter().cloned());
            for block in blocks {
                out.extend(block);
            }
        }

        if out.is_empty() {
            return String::new();
        }
        let mut text = out.join("\n");
        if doc.trailing_newline {
            text.push('\n');
        }
        text
    }
}

/// Recompute one hunk's header and collect its surviving lines, or None if
/// no Add/Delete line survived.
fn build_hunk(hunk: &Hunk) -> Option<Vec<String>> {
    let kept: Vec<&DiffLine> = hunk.lines.iter().filter(|line| line.is_accepted()).collect();

    let mut old_count = 0u32;
    let mut new_count = 0u32;
    let mut has_change = false;
    for line in &kept {
        match line {
            DiffLine::Add { .. } => {
                new_count += 1;
                has_change = true;
            }
            DiffLine::Delete { .. } => {
                old_count += 1;
                has_change = true;
            }
            DiffLine::Context { .. } => {
                old_count += 1;
                new_count += 1;
            }
            DiffLine::Meta { .. } => {}
        }
    }
    if !has_change {
        return None;
    }

    let header = if hunk.section.is_empty() {
        format!(
            "@@ -{},{} +{},{} @@",
            hunk.old_start, old_count, hunk.new_start, new_count
        )
    } else {
        format!(
            "@@ -{},{} +{},{} @@ {}",
            hunk.old_start, old_count, hunk.new_start, new_count, hunk.section
        )
    };

    let mut block = Vec::with_capacity(kept.len() + 1);
    block.push(header);
    block.extend(kept.iter().map(|line| line.raw().to_string()));
    Some(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DiffParser;

    const DIFF: &str = r#"diff --git a/src/main.rs b/src/main.rs
index abc123..def456 100644
--- a/src/main.rs
+++ b/src/main.rs
@@ -1,3 +1,4 @@
 fn main() {
-    println!("Hello");
+    println!("Hello, world!");
+    run();
 }
"#;

    #[test]
    fn test_round_trip_identity() {
        let doc = DiffParser::parse(DIFF);
        assert_eq!(DiffBuilder::build(&doc), DIFF);
    }

    #[test]
    fn test_round_trip_without_trailing_newline() {
        let diff = "diff --git a/f b/f\n--- a/f\n+++ b/f\n@@ -1,1 +1,1 @@\n-old\n+new";
        let doc = DiffParser::parse(diff);
        assert_eq!(DiffBuilder::build(&doc), diff);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let doc = DiffParser::parse(DIFF);
        let first = DiffBuilder::build(&doc);
        let second = DiffBuilder::build(&doc);
        assert_eq!(first, second);
    }

    #[test]
    fn test_full_rejection_yields_empty_output() {
        let mut doc = DiffParser::parse(DIFF);
        doc.reject_all();
        assert_eq!(DiffBuilder::build(&doc), "");
    }

    #[test]
    fn test_counts_recomputed_after_partial_rejection() {
        let mut doc = DiffParser::parse(DIFF);
        // Reject "+    run();"
        doc.set_accepted(0, 0, 3, false).unwrap();
        let rebuilt = DiffBuilder::build(&doc);
        assert!(rebuilt.contains("@@ -1,3 +1,3 @@\n"));
        assert!(!rebuilt.contains("run();"));
    }

    #[test]
    fn test_hunk_with_all_changes_rejected_is_dropped() {
        let two_hunks = r#"diff --git a/f b/f
--- a/f
+++ b/f
@@ -1,2 +1,2 @@
 keep
-first old
+first new
@@ -10,2 +10,2 @@
 also keep
-second old
+second new
"#;
        let mut doc = DiffParser::parse(two_hunks);
        doc.set_accepted(0, 1, 1, false).unwrap();
        doc.set_accepted(0, 1, 2, false).unwrap();

        let rebuilt = DiffBuilder::build(&doc);
        assert!(rebuilt.contains("first new"));
        // The second hunk contributed no change: its context vanished with it
        assert!(!rebuilt.contains("@@ -10"));
        assert!(!rebuilt.contains("also keep"));
    }

    #[test]
    fn test_file_with_no_surviving_hunks_is_dropped() {
        let two_files = r#"diff --git a/one b/one
--- a/one
+++ b/one
@@ -1,1 +1,1 @@
-a
+b
diff --git a/two b/two
--- a/two
+++ b/two
@@ -1,1 +1,1 @@
-c
+d
"#;
        let mut doc = DiffParser::parse(two_files);
        doc.set_accepted(0, 0, 0, false).unwrap();
        doc.set_accepted(0, 0, 1, false).unwrap();

        let rebuilt = DiffBuilder::build(&doc);
        assert!(!rebuilt.contains("a/one"));
        assert!(rebuilt.starts_with("diff --git a/two b/two\n"));
    }

    #[test]
    fn test_starts_are_not_renumbered() {
        let two_hunks = r#"diff --git a/f b/f
--- a/f
+++ b/f
@@ -1,3 +1,4 @@
 x
+inserted one
+inserted two
 y
@@ -20,2 +21,2 @@
 z
-old
+new
"#;
        let mut doc = DiffParser::parse(two_hunks);
        // Reject one insertion in the first hunk; the second hunk's declared
        // starts stay exactly as parsed
        doc.set_accepted(0, 0, 1, false).unwrap();
        let rebuilt = DiffBuilder::build(&doc);
        assert!(rebuilt.contains("@@ -1,2 +1,3 @@\n"));
        assert!(rebuilt.contains("@@ -20,2 +21,2 @@\n"));
    }

    #[test]
    fn test_section_header_survives_rebuild() {
        let diff = r#"diff --git a/f b/f
--- a/f
+++ b/f
@@ -1,2 +1,2 @@ fn main()
 x
-y
+z
"#;
        let doc = DiffParser::parse(diff);
        assert_eq!(DiffBuilder::build(&doc), diff);
    }

    #[test]
    fn test_meta_lines_survive_rebuild() {
        let diff = r#"diff --git a/f b/f
--- a/f
+++ b/f
@@ -1,1 +1,1 @@
-old
+new
\ No newline at end of file
"#;
        let doc = DiffParser::parse(diff);
        assert_eq!(DiffBuilder::build(&doc), diff);
    }

    #[test]
    fn test_empty_document_builds_empty_string() {
        assert_eq!(DiffBuilder::build(&DiffDocument::default()), "");
    }
}
