//! Git repository access and commit records.
//!
//! Everything here is the boundary between libgit2 and the pure history
//! engine: commits come out as [`Commit`] values, diffs come out as unified
//! patch text ready for [`crate::diff::parse`].

pub mod commit;
pub mod error;
pub mod repository;

pub use commit::Commit;
pub use error::GitError;
pub use repository::{GitRepository, WorkingChanges};

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 7;

/// Default number of commits loaded for a history view.
pub const DEFAULT_LOG_LIMIT: usize = 200;

/// Truncates a commit hash to [`SHORT_HASH_LEN`] characters.
pub fn short_hash(hash: &str) -> &str {
    hash.get(..SHORT_HASH_LEN).unwrap_or(hash)
}
