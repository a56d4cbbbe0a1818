//! CLI interface for histview.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod changes;
pub mod config;
pub mod formatting;
pub mod help;
pub mod log;
pub mod parse;
pub mod show;

/// histview: commit graph and diff browser.
#[derive(Parser)]
#[command(name = "histview")]
#[command(about = "Commit graph and diff browser for git repositories", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Shows the commit graph.
    Log(log::LogCommand),
    /// Shows the files changed by a commit.
    Show(show::ShowCommand),
    /// Shows staged, unstaged and untracked changes.
    Changes(changes::ChangesCommand),
    /// Parses unified diff text into the structured model.
    Parse(parse::ParseCommand),
    /// Prints the effective settings.
    Config(config::ConfigCommand),
    /// Displays comprehensive help for all commands.
    #[command(name = "help-all")]
    HelpAll(help::HelpCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Log(log_cmd) => log_cmd.execute(),
            Commands::Show(show_cmd) => show_cmd.execute(),
            Commands::Changes(changes_cmd) => changes_cmd.execute(),
            Commands::Parse(parse_cmd) => parse_cmd.execute(),
            Commands::Config(config_cmd) => config_cmd.execute(),
            Commands::HelpAll(help_cmd) => help_cmd.execute(),
        }
    }
}
