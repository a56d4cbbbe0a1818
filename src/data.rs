//! Structured views emitted by the CLI.

use serde::Serialize;

use crate::diff::{DiffStat, FileDiff, TreeNode};
use crate::git::{Commit, WorkingChanges};
use crate::graph::{GraphEdge, GraphRow};

pub mod yaml;

pub use yaml::*;

/// Version information for the histview tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    /// Version of the histview tool.
    pub histview: String,
}

impl VersionInfo {
    /// Version of the running binary.
    pub fn current() -> Self {
        Self {
            histview: crate::VERSION.to_string(),
        }
    }
}

/// Laid-out history as emitted by `histview log --yaml`.
#[derive(Debug, Clone, Serialize)]
pub struct LogView {
    /// Version information for the histview tool.
    pub versions: VersionInfo,
    /// Number of lane columns the graph needs.
    pub lanes: usize,
    /// Commits in display order.
    pub commits: Vec<LogEntry>,
}

/// One commit together with its place in the graph.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// The commit itself.
    #[serde(flatten)]
    pub commit: Commit,
    /// Lane the commit node sits on.
    pub lane: usize,
    /// Edges to parents further down.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<GraphEdge>,
    /// Parents beyond the loaded window.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dangling_parents: Vec<String>,
}

impl LogView {
    /// Pairs commits with the rows built from them.
    pub fn new(commits: Vec<Commit>, rows: Vec<GraphRow>, lanes: usize) -> Self {
        let commits = commits
            .into_iter()
            .zip(rows)
            .map(|(commit, row)| LogEntry {
                commit,
                lane: row.lane,
                edges: row.edges,
                dangling_parents: row.dangling_parents,
            })
            .collect();

        Self {
            versions: VersionInfo::current(),
            lanes,
            commits,
        }
    }
}

/// A parsed commit diff as emitted by `histview show --yaml`.
#[derive(Debug, Clone, Serialize)]
pub struct ShowView<'a> {
    /// Version information for the histview tool.
    pub versions: VersionInfo,
    /// The commit being shown.
    pub commit: &'a Commit,
    /// Totals over all files.
    pub stat: DiffStat,
    /// Per-file diffs, present unless the tree is requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<&'a [FileDiff]>,
    /// Directory tree over the changed files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<Vec<TreeNode<'a>>>,
}

impl<'a> ShowView<'a> {
    /// Flat file list view.
    pub fn files(commit: &'a Commit, files: &'a [FileDiff]) -> Self {
        Self {
            versions: VersionInfo::current(),
            commit,
            stat: DiffStat::from_files(files),
            files: Some(files),
            tree: None,
        }
    }

    /// Tree view; leaves carry the full file diffs.
    pub fn tree(commit: &'a Commit, files: &'a [FileDiff]) -> Self {
        Self {
            versions: VersionInfo::current(),
            commit,
            stat: DiffStat::from_files(files),
            files: None,
            tree: Some(crate::diff::build_tree(files)),
        }
    }
}

/// Uncommitted changes as emitted by `histview changes --yaml`.
#[derive(Debug, Clone, Serialize)]
pub struct ChangesView<'a> {
    /// Version information for the histview tool.
    pub versions: VersionInfo,
    /// Checked-out branch; absent when HEAD is detached or unborn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Totals over staged and unstaged files.
    pub stat: DiffStat,
    /// Staged, unstaged and untracked entries.
    #[serde(flatten)]
    pub changes: &'a WorkingChanges,
}

impl<'a> ChangesView<'a> {
    /// Wraps collected changes with their totals.
    pub fn new(branch: Option<String>, changes: &'a WorkingChanges) -> Self {
        Self {
            versions: VersionInfo::current(),
            branch,
            stat: DiffStat::from_files(&changes.combined()),
            changes,
        }
    }
}
