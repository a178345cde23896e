//! External strategy: pipe the diff into `git apply`.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use tracing::debug;

/// Whether `root` looks like a git checkout the external tool can patch.
pub(crate) fn is_git_worktree(root: &Path) -> bool {
    root.join(".git").exists()
}

/// Run `git apply` inside `root`, feeding the diff on stdin.
///
/// Any failure here (spawn, pipe, non-zero exit) is reported to the caller,
/// which falls through to the in-memory strategy.
pub(crate) fn git_apply(diff: &str, root: &Path) -> Result<()> {
    debug!("running git apply in {}", root.display());

    let mut child = Command::new("git")
        .args(["apply", "--whitespace=nowarn", "-"])
        .current_dir(root)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("Failed to spawn git apply")?;

    child
        .stdin
        .take()
        .context("git apply stdin was not piped")?
        .write_all(diff.as_bytes())
        .context("Failed to write diff to git apply stdin")?;

    let output = child
        .wait_with_output()
        .context("Failed to wait for git apply")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git apply exited with {}: {}", output.status, stderr.trim());
    }
    Ok(())
}
