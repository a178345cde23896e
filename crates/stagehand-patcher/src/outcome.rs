//! Outcome and option types for patch application.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the working tree was mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplyStrategy {
    /// `git apply` ran as a subprocess inside the target tree.
    External,
    /// The in-process splice engine rewrote the files directly.
    InMemory,
}

/// Terminal result of one apply call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ApplyOutcome {
    /// The whole batch was applied with the given strategy.
    Applied { strategy: ApplyStrategy },
    /// The batch stopped at the first failing file. Files written earlier in
    /// the same batch stay written; callers that need atomicity snapshot the
    /// tree before applying.
    Failed { reason: ApplyFailure },
}

/// Reason an apply batch stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ApplyFailure {
    /// The target exists but its current content could not be read
    /// (permissions, non-UTF-8 bytes, a directory in the way). The file is
    /// left untouched.
    #[error("failed to read {}: {message}", .path.display())]
    FileRead { path: PathBuf, message: String },
    /// Writing the rewritten file (or creating its parent directory) failed.
    #[error("failed to write {}: {message}", .path.display())]
    FileWrite { path: PathBuf, message: String },
    /// The diff names a path that would resolve outside the target root.
    #[error("path escapes the target root: {}", .path.display())]
    UnsafePath { path: PathBuf },
}

/// Caller preferences for one apply call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplyOptions {
    /// Try `git apply` first when the target tree is a git checkout.
    pub prefer_external_tool: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            prefer_external_tool: true,
        }
    }
}
