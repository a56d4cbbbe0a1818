//! Repository access errors.

use thiserror::Error;

/// Errors raised while reading history or diffs from a repository.
#[derive(Error, Debug)]
pub enum GitError {
    /// The path is not inside a git repository.
    #[error("Not a git repository: {path}")]
    NotARepository {
        /// Path that was probed.
        path: String,
        /// Underlying libgit2 error.
        #[source]
        source: git2::Error,
    },

    /// A revision expression did not resolve to a commit.
    #[error("Revision not found: {rev}")]
    RevisionNotFound {
        /// The revision expression as given.
        rev: String,
        /// Underlying libgit2 error.
        #[source]
        source: git2::Error,
    },

    /// HEAD does not point at a branch.
    #[error("Repository is in detached HEAD state")]
    DetachedHead,
}
