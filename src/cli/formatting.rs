//! Shared terminal formatting for the CLI commands.
//!
//! Every writer takes a [`WriteColor`] so that tests can render through
//! [`termcolor::NoColor`] and compare plain text.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::diff::tree::flatten;
use crate::diff::{DiffStat, FileDiff, FileStatus, TreeNode};
use crate::git::Commit;
use crate::utils::Settings;

/// Stdout stream honouring the colour settings.
pub(crate) fn stdout(settings: &Settings) -> StandardStream {
    let choice = if settings.color_enabled() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

fn status_color(status: FileStatus) -> Color {
    match status {
        FileStatus::Added => Color::Green,
        FileStatus::Deleted => Color::Red,
        FileStatus::Modified => Color::Yellow,
        FileStatus::Renamed => Color::Cyan,
    }
}

fn write_counts<W: WriteColor>(out: &mut W, additions: usize, deletions: usize) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(out, "+{additions}")?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
    write!(out, " -{deletions}")?;
    out.reset()
}

fn write_marker<W: WriteColor>(out: &mut W, status: FileStatus) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(status_color(status))))?;
    write!(out, "{}", status.marker())?;
    out.reset()
}

/// `{marker} {path} +a -d`, with `old -> new` for renames.
pub(crate) fn write_file_line<W: WriteColor>(
    out: &mut W,
    file: &FileDiff,
    indent: usize,
) -> io::Result<()> {
    write!(out, "{:indent$}", "", indent = indent * 2)?;
    write_marker(out, file.status)?;
    if file.status == FileStatus::Renamed {
        write!(out, " {} -> {} ", file.old_path, file.new_path)?;
    } else {
        write!(out, " {} ", file.display_path())?;
    }
    write_counts(out, file.additions, file.deletions)?;
    writeln!(out)
}

/// Indented tree listing; directories show how many files they hold.
pub(crate) fn write_tree<W: WriteColor>(out: &mut W, roots: &[TreeNode<'_>]) -> io::Result<()> {
    for (depth, node) in flatten(roots) {
        match node.file {
            Some(file) if !node.is_dir => {
                write!(out, "{:indent$}", "", indent = depth * 2)?;
                write_marker(out, file.status)?;
                write!(out, " {} ", node.name)?;
                write_counts(out, file.additions, file.deletions)?;
                writeln!(out)?;
            }
            _ => {
                write!(out, "{:indent$}", "", indent = depth * 2)?;
                let mut spec = ColorSpec::new();
                spec.set_fg(Some(Color::Blue)).set_bold(true);
                out.set_color(&spec)?;
                write!(out, "{}/", node.name)?;
                out.reset()?;
                let count = node.file_count();
                let noun = if count == 1 { "file" } else { "files" };
                writeln!(out, " ({count} {noun})")?;
            }
        }
    }
    Ok(())
}

/// Summary line, e.g. `3 files changed, +10 -2`.
pub(crate) fn write_stat<W: WriteColor>(out: &mut W, stat: &DiffStat) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "{stat}")?;
    out.reset()?;
    writeln!(out)
}

/// `git show`-style header: hash, labels, author, date and subject.
pub(crate) fn write_commit_header<W: WriteColor>(out: &mut W, commit: &Commit) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    write!(out, "commit {}", commit.hash)?;
    out.reset()?;
    if !commit.refs.is_empty() {
        write!(out, " ({})", commit.refs.join(", "))?;
    }
    writeln!(out)?;
    writeln!(out, "Author: {}", commit.author)?;
    writeln!(out, "Date:   {}", commit.date.format("%a %b %-d %H:%M:%S %Y %z"))?;
    writeln!(out)?;
    writeln!(out, "    {}", commit.message)?;
    writeln!(out)
}
