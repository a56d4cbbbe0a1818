//! Git repository operations

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use git2::{
    Diff, DiffFindOptions, DiffFormat, ErrorCode, Oid, Repository, Sort, Status, StatusOptions,
};
use serde::Serialize;
use tracing::debug;

use crate::diff::{self, FileDiff};
use crate::git::{Commit, GitError};

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

/// Uncommitted changes, split the way `git status` splits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkingChanges {
    /// Index vs HEAD.
    pub staged: Vec<FileDiff>,
    /// Working tree vs index.
    pub unstaged: Vec<FileDiff>,
    /// Paths not known to the index (ignored files excluded).
    pub untracked: Vec<String>,
}

impl WorkingChanges {
    /// Whether anything at all is uncommitted.
    pub fn has_changes(&self) -> bool {
        !self.staged.is_empty() || !self.unstaged.is_empty() || !self.untracked.is_empty()
    }

    /// Number of entries across all three groups.
    pub fn total(&self) -> usize {
        self.staged.len() + self.unstaged.len() + self.untracked.len()
    }

    /// Staged diffs followed by unstaged diffs, as one list for display.
    pub fn combined(&self) -> Vec<FileDiff> {
        self.staged
            .iter()
            .chain(self.unstaged.iter())
            .cloned()
            .collect()
    }
}

impl GitRepository {
    /// Open repository at current directory
    pub fn open() -> Result<Self> {
        Self::open_at(".")
    }

    /// Open repository at specified path
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|source| GitError::NotARepository {
            path: path.display().to_string(),
            source,
        })?;
        debug!(path = %repo.path().display(), "Opened repository");

        Ok(Self { repo })
    }

    /// Get current branch name
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head().context("Failed to get HEAD reference")?;

        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return Ok(name.to_string());
            }
        }

        Err(GitError::DetachedHead.into())
    }

    /// Loads up to `limit` commits from HEAD and every branch and tag,
    /// children before parents.
    pub fn log(&self, limit: usize) -> Result<Vec<Commit>> {
        let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
        walker
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .context("Failed to set revwalk sorting")?;

        match walker.push_head() {
            Ok(()) => {}
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                debug!("HEAD is unborn, walking refs only");
            }
            Err(e) => return Err(e).context("Failed to push HEAD"),
        }
        for glob in ["refs/heads", "refs/remotes", "refs/tags"] {
            walker
                .push_glob(glob)
                .with_context(|| format!("Failed to push {glob}"))?;
        }

        let labels = self.ref_labels()?;
        let mut commits = Vec::new();
        for oid in walker.take(limit) {
            let oid = oid.context("Failed to get commit OID from walker")?;
            let commit = self
                .repo
                .find_commit(oid)
                .context("Failed to find commit")?;
            let refs = labels.get(&oid).cloned().unwrap_or_default();
            commits.push(Commit::from_git_commit(&commit, refs)?);
        }

        debug!(count = commits.len(), limit, "Loaded history");
        Ok(commits)
    }

    /// Decoration labels per commit, in the order `git log --decorate` uses:
    /// HEAD first, then local branches, remote branches and tags.
    pub fn ref_labels(&self) -> Result<HashMap<Oid, Vec<String>>> {
        let mut ranked: HashMap<Oid, Vec<(u8, String)>> = HashMap::new();

        let head_branch = match self.repo.head() {
            Ok(head) => {
                if let Ok(commit) = head.peel_to_commit() {
                    let label = if head.is_branch() {
                        head.shorthand().map(|name| format!("HEAD -> {name}"))
                    } else {
                        Some("HEAD".to_string())
                    };
                    if let Some(label) = label {
                        ranked.entry(commit.id()).or_default().push((0, label));
                    }
                }
                head.is_branch()
                    .then(|| head.shorthand().map(str::to_string))
                    .flatten()
            }
            Err(_) => None,
        };

        let references = self
            .repo
            .references()
            .context("Failed to list references")?;
        for reference in references {
            let reference = reference.context("Failed to read reference")?;
            let Some(short) = reference.shorthand() else {
                continue;
            };
            let (rank, label) = if reference.is_branch() {
                if head_branch.as_deref() == Some(short) {
                    continue;
                }
                (1, short.to_string())
            } else if reference.is_remote() {
                (2, short.to_string())
            } else if reference.is_tag() {
                (3, format!("tag: {short}"))
            } else {
                continue;
            };

            // Annotated tags and symbolic refs resolve through peeling.
            let Ok(commit) = reference.peel_to_commit() else {
                continue;
            };
            ranked.entry(commit.id()).or_default().push((rank, label));
        }

        Ok(ranked
            .into_iter()
            .map(|(oid, mut labels)| {
                labels.sort();
                (oid, labels.into_iter().map(|(_, label)| label).collect())
            })
            .collect())
    }

    /// Resolves a revision expression to a commit.
    fn resolve_commit(&self, rev: &str) -> Result<git2::Commit<'_>> {
        let object = self
            .repo
            .revparse_single(rev)
            .map_err(|source| GitError::RevisionNotFound {
                rev: rev.to_string(),
                source,
            })?;
        object
            .peel_to_commit()
            .with_context(|| format!("'{rev}' does not point at a commit"))
    }

    /// Looks up a single commit with its decoration labels.
    pub fn commit(&self, rev: &str) -> Result<Commit> {
        let commit = self.resolve_commit(rev)?;
        let refs = self
            .ref_labels()?
            .remove(&commit.id())
            .unwrap_or_default();
        Commit::from_git_commit(&commit, refs)
    }

    /// Unified patch text of a commit against its first parent, or against
    /// the empty tree for a root commit. Renames are detected.
    pub fn commit_diff(&self, rev: &str) -> Result<String> {
        let commit = self.resolve_commit(rev)?;
        let commit_tree = commit.tree().context("Failed to get commit tree")?;

        let parent_tree = if commit.parent_count() > 0 {
            Some(
                commit
                    .parent(0)
                    .context("Failed to get parent commit")?
                    .tree()
                    .context("Failed to get parent tree")?,
            )
        } else {
            None
        };

        let mut diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&commit_tree), None)
            .context("Failed to create diff")?;
        let mut find = DiffFindOptions::new();
        find.renames(true);
        diff.find_similar(Some(&mut find))
            .context("Failed to detect renames")?;

        patch_text(&diff)
    }

    /// Parsed diff of a commit.
    pub fn commit_files(&self, rev: &str) -> Result<Vec<FileDiff>> {
        Ok(diff::parse(&self.commit_diff(rev)?))
    }

    /// Staged, unstaged and untracked changes in the working tree.
    pub fn working_changes(&self) -> Result<WorkingChanges> {
        let head_tree = match self.repo.head() {
            Ok(head) => Some(head.peel_to_tree().context("Failed to get HEAD tree")?),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => None,
            Err(e) => return Err(e).context("Failed to get HEAD reference"),
        };

        let staged = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), None, None)
            .context("Failed to diff index against HEAD")?;
        let unstaged = self
            .repo
            .diff_index_to_workdir(None, None)
            .context("Failed to diff working tree against index")?;

        let mut options = StatusOptions::new();
        options.include_untracked(true).recurse_untracked_dirs(true);
        let statuses = self
            .repo
            .statuses(Some(&mut options))
            .context("Failed to get repository status")?;
        let untracked = statuses
            .iter()
            .filter(|entry| entry.status().contains(Status::WT_NEW))
            .filter_map(|entry| entry.path().map(str::to_string))
            .collect();

        Ok(WorkingChanges {
            staged: diff::parse(&patch_text(&staged)?),
            unstaged: diff::parse(&patch_text(&unstaged)?),
            untracked,
        })
    }
}

/// Renders a libgit2 diff as unified patch text.
fn patch_text(diff: &Diff<'_>) -> Result<String> {
    let mut text = String::new();

    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let content = String::from_utf8_lossy(line.content());
        match line.origin() {
            prefix @ ('+' | '-' | ' ') => text.push(prefix),
            _ => {}
        }
        text.push_str(&content);
        true
    })
    .context("Failed to format diff")?;

    Ok(text)
}
