//! Per-line acceptance mutation over a parsed document.
//!
//! Acceptance state lives only inside the [`DiffDocument`] owned by the
//! reviewing session; mutation goes through these explicit operations so
//! independent document snapshots never alias each other.

use thiserror::Error;

use crate::model::{DiffDocument, DiffLine};

/// Caller addressed a position that does not exist in the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("file index {index} out of range ({len} files)")]
    FileIndex { index: usize, len: usize },
    #[error("hunk index {index} out of range ({len} hunks)")]
    HunkIndex { index: usize, len: usize },
    #[error("line index {index} out of range ({len} lines)")]
    LineIndex { index: usize, len: usize },
}

impl DiffDocument {
    /// Set the acceptance flag of one Add/Delete line.
    ///
    /// Addressing a Context or Meta line is an accepted no-op. Addressing a
    /// position outside the document is a contract violation and returns an
    /// error without touching the document.
    pub fn set_accepted(
        &mut self,
        file: usize,
        hunk: usize,
        line: usize,
        accepted: bool,
    ) -> Result<(), ReviewError> {
        let len = self.files.len();
        let file_diff = self
            .files
            .get_mut(file)
            .ok_or(ReviewError::FileIndex { index: file, len })?;

        let len = file_diff.hunks.len();
        let target_hunk = file_diff
            .hunks
            .get_mut(hunk)
            .ok_or(ReviewError::HunkIndex { index: hunk, len })?;

        let len = target_hunk.lines.len();
        let target_line = target_hunk
            .lines
            .get_mut(line)
            .ok_or(ReviewError::LineIndex { index: line, len })?;

        match target_line {
            DiffLine::Add { accepted: flag, .. } | DiffLine::Delete { accepted: flag, .. } => {
                *flag = accepted;
            }
            DiffLine::Context { .. } | DiffLine::Meta { .. } => {}
        }
        Ok(())
    }

    /// Mark every Add/Delete line in the document as accepted.
    pub fn approve_all(&mut self) {
        self.set_all(true);
    }

    /// Mark every Add/Delete line in the document as rejected.
    pub fn reject_all(&mut self) {
        self.set_all(false);
    }

    fn set_all(&mut self, accepted: bool) {
        for file in &mut self.files {
            for hunk in &mut file.hunks {
                for line in &mut hunk.lines {
                    if let DiffLine::Add { accepted: flag, .. }
                    | DiffLine::Delete { accepted: flag, .. } = line
                    {
                        *flag = accepted;
                    }
                }
            }
        }
    }
}
