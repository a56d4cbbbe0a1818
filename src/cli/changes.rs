//! `histview changes`: uncommitted work.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use termcolor::{ColorSpec, WriteColor};

use super::formatting::{write_file_line, write_stat};
use crate::data::{to_yaml, ChangesView};
use crate::diff::{DiffStat, FileDiff};
use crate::git::{GitRepository, WorkingChanges};
use crate::utils::Settings;

/// Changes command options.
#[derive(Parser)]
pub struct ChangesCommand {
    /// Emits the changes as YAML.
    #[arg(long)]
    pub yaml: bool,
}

impl ChangesCommand {
    /// Executes the changes command.
    pub fn execute(self) -> Result<()> {
        let repo = GitRepository::open().context("Failed to open git repository")?;
        let branch = repo.current_branch().ok();
        let changes = repo
            .working_changes()
            .context("Failed to collect working tree changes")?;

        if self.yaml {
            print!("{}", to_yaml(&ChangesView::new(branch, &changes))?);
            return Ok(());
        }

        let settings = Settings::load()?;
        let mut out = super::formatting::stdout(&settings);
        write_changes(&mut out, branch.as_deref(), &changes)?;
        Ok(())
    }
}

fn write_changes<W: WriteColor>(
    out: &mut W,
    branch: Option<&str>,
    changes: &WorkingChanges,
) -> std::io::Result<()> {
    match branch {
        Some(branch) => writeln!(out, "On branch {branch}")?,
        None => writeln!(out, "Not on a branch")?,
    }

    if !changes.has_changes() {
        return writeln!(out, "Nothing to show, working tree clean");
    }

    write_section(out, "Staged changes", &changes.staged)?;
    write_section(out, "Unstaged changes", &changes.unstaged)?;
    if !changes.untracked.is_empty() {
        writeln!(out)?;
        write_heading(out, "Untracked files")?;
        for path in &changes.untracked {
            writeln!(out, "  ? {path}")?;
        }
    }

    writeln!(out)?;
    write_stat(out, &DiffStat::from_files(&changes.combined()))
}

fn write_heading<W: WriteColor>(out: &mut W, title: &str) -> std::io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "{title}:")?;
    out.reset()?;
    writeln!(out)
}

fn write_section<W: WriteColor>(out: &mut W, title: &str, files: &[FileDiff]) -> std::io::Result<()> {
    if files.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    write_heading(out, title)?;
    for file in files {
        write_file_line(out, file, 1)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::diff::FileStatus;
    use termcolor::NoColor;

    fn render(branch: Option<&str>, changes: &WorkingChanges) -> String {
        let mut out = NoColor::new(Vec::new());
        write_changes(&mut out, branch, changes).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn clean_tree() {
        let text = render(Some("main"), &WorkingChanges::default());
        assert_eq!(text, "On branch main\nNothing to show, working tree clean\n");
    }

    #[test]
    fn all_sections() {
        let mut staged = FileDiff::new("a.txt", "a.txt");
        staged.status = FileStatus::Added;
        staged.additions = 2;
        let mut unstaged = FileDiff::new("b.txt", "b.txt");
        unstaged.deletions = 1;
        let changes = WorkingChanges {
            staged: vec![staged],
            unstaged: vec![unstaged],
            untracked: vec!["c.txt".to_string()],
        };

        let expected = "\
Not on a branch

Staged changes:
  + a.txt +2 -0

Unstaged changes:
  ~ b.txt +0 -1

Untracked files:
  ? c.txt

2 files changed, +2 -1
";
        assert_eq!(render(None, &changes), expected);
    }
}
