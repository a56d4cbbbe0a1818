//! Unified diff model, parsing and file-tree grouping.
//!
//! [`parse`] turns the textual output of `git diff` / `git show` into a list of
//! [`FileDiff`] records; [`build_tree`] groups those records into a directory
//! hierarchy for display.

use serde::{Deserialize, Serialize};

pub mod parser;
pub mod tree;

pub use parser::parse;
pub use tree::{build_tree, TreeNode};

/// How a file changed between the two sides of a diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// File exists only on the new side.
    Added,
    /// File exists on both sides.
    #[default]
    Modified,
    /// File exists only on the old side.
    Deleted,
    /// File moved from `old_path` to `new_path`.
    Renamed,
}

impl FileStatus {
    /// Single-character marker used in compact listings.
    pub fn marker(self) -> char {
        match self {
            Self::Added => '+',
            Self::Deleted => '-',
            Self::Renamed => '>',
            Self::Modified => '~',
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Modified => write!(f, "modified"),
            Self::Deleted => write!(f, "deleted"),
            Self::Renamed => write!(f, "renamed"),
        }
    }
}

/// Classification of a single hunk body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// Unchanged line present on both sides.
    #[serde(rename = "context")]
    Context,
    /// Line present only on the new side.
    #[serde(rename = "add")]
    Add,
    /// Line present only on the old side.
    #[serde(rename = "del", alias = "delete")]
    Delete,
}

/// One classified line inside a hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    /// Line classification.
    #[serde(rename = "type")]
    pub kind: LineKind,
    /// Line text with the leading marker character removed.
    pub content: String,
    /// Line number on the old side (context and delete lines).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_num: Option<u32>,
    /// Line number on the new side (context and add lines).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_num: Option<u32>,
}

/// A contiguous region of change introduced by an `@@ … @@` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    /// The raw header line.
    pub header: String,
    /// First line of the region on the old side.
    pub old_start: u32,
    /// Number of old-side lines in the region.
    pub old_count: u32,
    /// First line of the region on the new side.
    pub new_start: u32,
    /// Number of new-side lines in the region.
    pub new_count: u32,
    /// Body lines in input order.
    pub lines: Vec<DiffLine>,
}

/// All changes to a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiff {
    /// Path on the old side (`a/` prefix removed).
    pub old_path: String,
    /// Path on the new side (`b/` prefix removed).
    pub new_path: String,
    /// Kind of change.
    pub status: FileStatus,
    /// Number of add lines across all hunks.
    pub additions: usize,
    /// Number of delete lines across all hunks.
    pub deletions: usize,
    /// Hunks in input order.
    pub hunks: Vec<Hunk>,
}

impl FileDiff {
    /// Creates an empty, modified-status record for a file pair.
    pub fn new(old_path: impl Into<String>, new_path: impl Into<String>) -> Self {
        Self {
            old_path: old_path.into(),
            new_path: new_path.into(),
            status: FileStatus::Modified,
            additions: 0,
            deletions: 0,
            hunks: Vec::new(),
        }
    }

    /// Iterates over every body line of every hunk.
    pub fn lines(&self) -> impl Iterator<Item = &DiffLine> {
        self.hunks.iter().flat_map(|h| h.lines.iter())
    }

    /// Path shown to the user: the new path, except for deletions.
    pub fn display_path(&self) -> &str {
        if self.status == FileStatus::Deleted || self.new_path.is_empty() {
            &self.old_path
        } else {
            &self.new_path
        }
    }
}

/// Aggregate counts over a set of parsed files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStat {
    /// Number of files.
    pub files: usize,
    /// Total add lines.
    pub additions: usize,
    /// Total delete lines.
    pub deletions: usize,
}

impl DiffStat {
    /// Sums file and line counts.
    pub fn from_files(files: &[FileDiff]) -> Self {
        files.iter().fold(Self::default(), |acc, f| Self {
            files: acc.files + 1,
            additions: acc.additions + f.additions,
            deletions: acc.deletions + f.deletions,
        })
    }
}

impl std::fmt::Display for DiffStat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let noun = if self.files == 1 { "file" } else { "files" };
        write!(
            f,
            "{} {noun} changed, +{} -{}",
            self.files, self.additions, self.deletions
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn line_kind_wire_names() {
        let line = DiffLine {
            kind: LineKind::Delete,
            content: "gone".to_string(),
            old_num: Some(3),
            new_num: None,
        };
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"type":"del","content":"gone","oldNum":3}"#);
    }

    #[test]
    fn line_kind_accepts_delete_alias() {
        let line: DiffLine =
            serde_json::from_str(r#"{"type":"delete","content":"x","oldNum":1}"#).unwrap();
        assert_eq!(line.kind, LineKind::Delete);
        assert_eq!(line.new_num, None);
    }

    #[test]
    fn file_diff_uses_camel_case_fields() {
        let mut file = FileDiff::new("src/a.rs", "src/b.rs");
        file.status = FileStatus::Renamed;
        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(value["oldPath"], "src/a.rs");
        assert_eq!(value["newPath"], "src/b.rs");
        assert_eq!(value["status"], "renamed");
    }

    #[test]
    fn display_path_prefers_old_side_for_deletions() {
        let mut file = FileDiff::new("old.txt", "old.txt");
        assert_eq!(file.display_path(), "old.txt");
        file.new_path = "new.txt".to_string();
        assert_eq!(file.display_path(), "new.txt");
        file.status = FileStatus::Deleted;
        assert_eq!(file.display_path(), "old.txt");
    }

    #[test]
    fn diff_stat_sums_files() {
        let mut a = FileDiff::new("a", "a");
        a.additions = 3;
        a.deletions = 1;
        let mut b = FileDiff::new("b", "b");
        b.additions = 2;
        let stat = DiffStat::from_files(&[a, b]);
        assert_eq!(
            stat,
            DiffStat {
                files: 2,
                additions: 5,
                deletions: 1
            }
        );
        assert_eq!(stat.to_string(), "2 files changed, +5 -1");
    }
}
