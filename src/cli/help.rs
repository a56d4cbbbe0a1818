//! `histview help-all`: every command's help in one document.

use anyhow::Result;
use clap::{Command, CommandFactory, Parser};

/// Help command options.
#[derive(Parser)]
pub struct HelpCommand {}

/// Renders help for the whole command tree.
pub struct HelpGenerator {
    app: Command,
}

impl HelpGenerator {
    /// Creates a generator over the histview command tree.
    pub fn new() -> Self {
        Self {
            app: crate::cli::Cli::command(),
        }
    }

    /// Top-level help followed by each subcommand, sorted by name and
    /// separated by a rule.
    pub fn generate_all_help(&self) -> String {
        let mut sections = vec![render_section(&self.app, None)];
        collect_sections(&self.app, "", &mut sections);
        sections.join(&format!("\n\n{}\n\n", "=".repeat(80)))
    }
}

impl Default for HelpGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_sections(cmd: &Command, prefix: &str, sections: &mut Vec<String>) {
    let mut subcommands: Vec<&Command> = cmd
        .get_subcommands()
        .filter(|sub| sub.get_name() != "help")
        .collect();
    subcommands.sort_by(|a, b| a.get_name().cmp(b.get_name()));

    for sub in subcommands {
        let path = if prefix.is_empty() {
            sub.get_name().to_string()
        } else {
            format!("{prefix} {}", sub.get_name())
        };
        sections.push(render_section(sub, Some(&path)));
        collect_sections(sub, &path, sections);
    }
}

fn render_section(cmd: &Command, path: Option<&str>) -> String {
    let title = match path {
        Some(path) => format!("histview {path}"),
        None => cmd.get_name().to_string(),
    };
    let about = cmd
        .get_about()
        .map_or_else(|| "No description available".to_string(), ToString::to_string);

    format!("{title} - {about}\n\n{}", cmd.clone().render_help())
}

impl HelpCommand {
    /// Executes the help command.
    pub fn execute(self) -> Result<()> {
        println!("{}", HelpGenerator::new().generate_all_help());
        Ok(())
    }
}
