//! `histview show`: the files a commit changed.

use anyhow::{Context, Result};
use clap::Parser;

use super::formatting::{write_commit_header, write_file_line, write_stat, write_tree};
use crate::data::{to_yaml, ShowView};
use crate::diff::{build_tree, DiffStat};
use crate::git::GitRepository;
use crate::utils::Settings;

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {
    /// Commit to show (any revision git understands).
    #[arg(default_value = "HEAD")]
    pub rev: String,

    /// Groups changed files into a directory tree.
    #[arg(long)]
    pub tree: bool,

    /// Emits the parsed diff as YAML.
    #[arg(long)]
    pub yaml: bool,
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        let repo = GitRepository::open().context("Failed to open git repository")?;
        let commit = repo.commit(&self.rev)?;
        let files = repo
            .commit_files(&commit.hash)
            .with_context(|| format!("Failed to diff {}", self.rev))?;

        if self.yaml {
            let view = if self.tree {
                ShowView::tree(&commit, &files)
            } else {
                ShowView::files(&commit, &files)
            };
            print!("{}", to_yaml(&view)?);
            return Ok(());
        }

        let settings = Settings::load()?;
        let mut out = super::formatting::stdout(&settings);
        write_commit_header(&mut out, &commit)?;
        if self.tree {
            write_tree(&mut out, &build_tree(&files))?;
        } else {
            for file in &files {
                write_file_line(&mut out, file, 0)?;
            }
        }
        write_stat(&mut out, &DiffStat::from_files(&files))?;
        Ok(())
    }
}
