//! `histview parse`: unified diff text in, structured model out.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::data::to_yaml;
use crate::diff::{self, FileDiff};

/// Parse command options.
#[derive(Parser)]
pub struct ParseCommand {
    /// Diff file to read; stdin when omitted or `-`.
    pub file: Option<PathBuf>,

    /// Emits JSON instead of YAML.
    #[arg(long)]
    pub json: bool,
}

impl ParseCommand {
    /// Executes the parse command.
    pub fn execute(self) -> Result<()> {
        let text = self.read_input()?;
        let files = diff::parse(&text);
        println!("{}", render(&files, self.json)?);
        Ok(())
    }

    fn read_input(&self) -> Result<String> {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
                .with_context(|| format!("Failed to read diff file: {}", path.display())),
            _ => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read diff from stdin")?;
                Ok(text)
            }
        }
    }
}

fn render(files: &[FileDiff], json: bool) -> Result<String> {
    if json {
        serde_json::to_string_pretty(files).context("Failed to serialize diff as JSON")
    } else {
        Ok(to_yaml(&files)?.trim_end().to_string())
    }
}
