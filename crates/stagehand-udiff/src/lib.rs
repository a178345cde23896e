//! Unified diff review engine: parse, selectively accept, rebuild.
//!
//! This crate turns raw unified diff text into a mutable review model,
//! lets a caller (typically the IDE session layer) accept or reject
//! individual change lines, and serializes the surviving lines back to
//! syntactically valid unified diff text.
//!
//! # Usage
//!
//! ```
//! use stagehand_udiff::{DiffBuilder, DiffParser};
//!
//! let diff = "diff --git a/f b/f\n\
//! --- a/f\n\
//! +++ b/f\n\
//! @@ -1,2 +1,2 @@\n \
//! context\n\
//! -old\n\
//! +new\n";
//!
//! let mut doc = DiffParser::parse(diff);
//!
//! // A fresh document is fully accepted: rebuilding reproduces the input.
//! assert_eq!(DiffBuilder::build(&doc), diff);
//!
//! // Reject the deletion; the rebuilt diff keeps only the insertion.
//! doc.set_accepted(0, 0, 1, false).unwrap();
//! let filtered = DiffBuilder::build(&doc);
//! assert!(!filtered.contains("-old"));
//! ```
//!
//! Parsing never fails and rebuilding is a pure function of the document's
//! acceptance state. The document holds no process-wide state and is meant
//! to be dropped when the review session ends.

mod builder;
mod model;
mod parser;
mod review;

pub use builder::DiffBuilder;
pub use model::{DiffDocument, DiffLine, DiffStats, FileDiff, Hunk};
pub use parser::DiffParser;
pub use review::ReviewError;
