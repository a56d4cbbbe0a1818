//! Line-oriented unified diff parser.
//!
//! Only the subset of the format that git actually emits is understood:
//! `diff --git` file headers, the mode/rename metadata lines that follow them,
//! `@@` hunk headers and `+`/`-`/` ` body lines. Anything else is skipped, so
//! a slightly malformed diff degrades to a partial result instead of an error.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::{DiffLine, FileDiff, FileStatus, Hunk, LineKind};

/// Prefix that opens a new per-file section.
const FILE_HEADER_PREFIX: &str = "diff --git";

/// Prefix of a hunk header.
const HUNK_PREFIX: &str = "@@";

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static FILE_HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^diff --git a/(?P<old>.*) b/(?P<new>.*)").unwrap());

#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static HUNK_HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(?P<os>\d+)(?:,(?P<oc>\d+))? \+(?P<ns>\d+)(?:,(?P<nc>\d+))? @@").unwrap()
});

/// Parses raw unified diff text into per-file records.
///
/// Empty or whitespace-only input yields an empty vector. File, hunk and line
/// order mirror the input exactly.
pub fn parse(diff_text: &str) -> Vec<FileDiff> {
    if diff_text.trim().is_empty() {
        return Vec::new();
    }

    let mut parser = DiffParser::new();
    for line in diff_text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

/// Incremental parser state: the file and hunk under construction plus the
/// running old/new line counters.
#[derive(Debug, Default)]
pub struct DiffParser {
    files: Vec<FileDiff>,
    current: Option<FileDiff>,
    /// Whether the last hunk of `current` accepts body lines.
    in_hunk: bool,
    old_line: u32,
    new_line: u32,
}

impl DiffParser {
    /// Creates a parser with no open file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one line of diff text (without its line terminator).
    pub fn feed_line(&mut self, line: &str) {
        if line.starts_with(FILE_HEADER_PREFIX) {
            self.flush_file();
            let (old_path, new_path) = parse_file_header(line).unwrap_or_default();
            self.current = Some(FileDiff::new(old_path, new_path));
            self.in_hunk = false;
            return;
        }

        let Some(file) = self.current.as_mut() else {
            return;
        };

        // Metadata lines fall through to the remaining rules.
        if line.starts_with("new file mode") {
            file.status = FileStatus::Added;
        } else if line.starts_with("deleted file mode") {
            file.status = FileStatus::Deleted;
        } else if line.starts_with("rename from") {
            file.status = FileStatus::Renamed;
        }

        if line.starts_with(HUNK_PREFIX) {
            match parse_hunk_header(line) {
                Some(hunk) => {
                    self.old_line = hunk.old_start;
                    self.new_line = hunk.new_start;
                    file.hunks.push(hunk);
                    self.in_hunk = true;
                }
                None => {
                    debug!(header = %line, file = %file.new_path, "Dropping malformed hunk header");
                    self.in_hunk = false;
                }
            }
            return;
        }

        if !self.in_hunk {
            return;
        }
        let Some(hunk) = file.hunks.last_mut() else {
            return;
        };

        let entry = if line.starts_with('+') && !line.starts_with("+++") {
            file.additions += 1;
            DiffLine {
                kind: LineKind::Add,
                content: line[1..].to_string(),
                old_num: None,
                new_num: Some(advance(&mut self.new_line)),
            }
        } else if line.starts_with('-') && !line.starts_with("---") {
            file.deletions += 1;
            DiffLine {
                kind: LineKind::Delete,
                content: line[1..].to_string(),
                old_num: Some(advance(&mut self.old_line)),
                new_num: None,
            }
        } else if line.starts_with('\\') {
            return;
        } else {
            DiffLine {
                kind: LineKind::Context,
                content: strip_marker(line).to_string(),
                old_num: Some(advance(&mut self.old_line)),
                new_num: Some(advance(&mut self.new_line)),
            }
        };
        hunk.lines.push(entry);
    }

    /// Flushes the open file and returns everything parsed so far.
    pub fn finish(mut self) -> Vec<FileDiff> {
        self.flush_file();
        self.files
    }

    fn flush_file(&mut self) {
        if let Some(file) = self.current.take() {
            self.files.push(file);
        }
        self.in_hunk = false;
    }
}

/// Splits a `diff --git a/<old> b/<new>` line into its two paths.
///
/// The old path extends to the last ` b/`, so paths containing spaces are
/// kept intact on the new side.
pub fn parse_file_header(line: &str) -> Option<(String, String)> {
    let captures = FILE_HEADER_PATTERN.captures(line)?;
    Some((
        captures["old"].to_string(),
        captures["new"].to_string(),
    ))
}

/// Parses an `@@ -S[,C] +S[,C] @@` header into an empty [`Hunk`].
///
/// Omitted counts default to 1. Returns `None` when the line does not match
/// or a number does not fit.
pub fn parse_hunk_header(line: &str) -> Option<Hunk> {
    let captures = HUNK_HEADER_PATTERN.captures(line)?;
    let number = |name: &str| -> Option<u32> {
        captures
            .name(name)
            .map_or(Some(1), |m| m.as_str().parse().ok())
    };

    Some(Hunk {
        header: line.to_string(),
        old_start: number("os")?,
        old_count: number("oc")?,
        new_start: number("ns")?,
        new_count: number("nc")?,
        lines: Vec::new(),
    })
}

/// Returns the current counter value and moves it forward by one.
fn advance(counter: &mut u32) -> u32 {
    let value = *counter;
    *counter = counter.saturating_add(1);
    value
}

/// Drops the first character of a body line.
fn strip_marker(line: &str) -> &str {
    let mut chars = line.chars();
    chars.next();
    chars.as_str()
}
