//! Commit records fed to the lane layout.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// A commit as the history view sees it.
///
/// Only `hash` and `parents` matter to the lane layout; the remaining fields
/// are carried through for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit hash.
    pub hash: String,
    /// Parent hashes in order: none for a root, two or more for a merge.
    pub parents: Vec<String>,
    /// Subject line of the commit message.
    pub message: String,
    /// Author name.
    pub author: String,
    /// Author date with the author's timezone.
    pub date: DateTime<FixedOffset>,
    /// Branch and tag labels pointing at this commit.
    #[serde(default)]
    pub refs: Vec<String>,
}

impl Commit {
    /// Creates a commit with only graph information filled in.
    pub fn new<S: Into<String>>(
        hash: impl Into<String>,
        parents: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            hash: hash.into(),
            parents: parents.into_iter().map(Into::into).collect(),
            message: String::new(),
            author: String::new(),
            date: DateTime::<FixedOffset>::default(),
            refs: Vec::new(),
        }
    }

    /// Sets the subject line.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the ref labels.
    pub fn with_refs<S: Into<String>>(mut self, refs: impl IntoIterator<Item = S>) -> Self {
        self.refs = refs.into_iter().map(Into::into).collect();
        self
    }

    /// Builds a record from a libgit2 commit and its decoration labels.
    pub fn from_git_commit(commit: &git2::Commit<'_>, refs: Vec<String>) -> Result<Self> {
        let author = commit.author();
        let when = author.when();
        let offset =
            FixedOffset::east_opt(when.offset_minutes() * 60).unwrap_or_else(|| Utc.fix());
        let date = DateTime::from_timestamp(when.seconds(), 0)
            .context("Invalid commit timestamp")?
            .with_timezone(&offset);

        Ok(Self {
            hash: commit.id().to_string(),
            parents: commit.parent_ids().map(|id| id.to_string()).collect(),
            message: commit.summary().unwrap_or("").to_string(),
            author: author.name().unwrap_or("Unknown").to_string(),
            date,
            refs,
        })
    }

    /// Whether this commit has more than one parent.
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Whether this commit has no parents.
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}
