//! `histview log`: the commit graph.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::data::{to_yaml, LogView};
use crate::git::GitRepository;
use crate::graph::{assign_lanes, build_rows, render_graph};
use crate::utils::Settings;

/// Log command options.
#[derive(Parser)]
pub struct LogCommand {
    /// Maximum number of commits to load (overrides HISTVIEW_LOG_LIMIT and settings).
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Emits the laid-out commits as YAML instead of drawing the graph.
    #[arg(long)]
    pub yaml: bool,
}

impl LogCommand {
    /// Executes the log command.
    pub fn execute(self) -> Result<()> {
        let settings = Settings::load()?;
        let limit = self
            .limit
            .filter(|&limit| limit > 0)
            .unwrap_or_else(|| settings.log_limit());

        let repo = GitRepository::open().context("Failed to open git repository")?;
        let commits = repo.log(limit).context("Failed to load history")?;
        let layout = assign_lanes(&commits);
        let rows = build_rows(&commits, &layout);
        debug!(commits = commits.len(), lanes = layout.width(), "Laid out history");

        if self.yaml {
            let view = LogView::new(commits, rows, layout.width());
            print!("{}", to_yaml(&view)?);
            return Ok(());
        }

        let mut out = super::formatting::stdout(&settings);
        render_graph(&mut out, &commits, &rows, layout.width())
            .context("Failed to write graph")?;
        Ok(())
    }
}
