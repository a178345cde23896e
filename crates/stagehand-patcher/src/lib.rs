//! Dual-strategy application of unified diffs to a working tree.
//!
//! Given diff text (usually the reconstructed output of a review session)
//! and a target directory, [`PatchApplier::apply`] first tries `git apply`
//! as a subprocess when the tree is a git checkout and the caller prefers
//! it, and otherwise falls back to an in-process splice engine that
//! rewrites the files directly from the parsed hunks.
//!
//! The call is synchronous and returns a single [`ApplyOutcome`]. A batch
//! is applied file by file and is **not atomic**: when a write fails, files
//! already rewritten in the same batch stay rewritten and the failure names
//! the offending path. Callers that need atomicity snapshot the tree before
//! applying. Concurrent applies against the same tree are the caller's
//! responsibility to serialize.

mod applier;
mod external;
mod outcome;

pub use applier::PatchApplier;
pub use outcome::{ApplyFailure, ApplyOptions, ApplyOutcome, ApplyStrategy};
