//! # histview
//!
//! Commit graph layout and unified diff parsing for git history browsers.
//!
//! The pure core has three pieces: [`graph::assign_lanes`] places a
//! children-first commit list on a bounded set of lanes, [`diff::parse`]
//! turns unified diff text into per-file hunks and lines, and
//! [`diff::build_tree`] groups parsed files into a sorted directory tree.
//! [`git::GitRepository`] feeds them from a real repository.
//!
//! ```rust
//! use histview::diff;
//!
//! let files = diff::parse("diff --git a/a.txt b/a.txt\n@@ -1 +1 @@\n-old\n+new\n");
//! assert_eq!(files[0].additions, 1);
//! assert_eq!(files[0].deletions, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod data;
pub mod diff;
pub mod git;
pub mod graph;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of histview.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
