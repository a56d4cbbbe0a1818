//! Settings and configuration utilities.
//!
//! Settings are read from `$HOME/.histview/settings.json`. Environment
//! variables take precedence over the file, and the file's `env` map acts as
//! a fallback for variables that are not set.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::git::DEFAULT_LOG_LIMIT;

/// Overrides the number of commits loaded by `log`.
pub const LOG_LIMIT_VAR: &str = "HISTVIEW_LOG_LIMIT";

/// Disables coloured output when set to any value.
pub const NO_COLOR_VARS: [&str; 2] = ["HISTVIEW_NO_COLOR", "NO_COLOR"];

/// Settings loaded from $HOME/.histview/settings.json.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Environment variable fallbacks.
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Number of commits loaded for a history view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_limit: Option<usize>,
    /// Whether to colour terminal output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

impl Settings {
    /// Loads settings from the default location.
    pub fn load() -> Result<Self> {
        let settings_path = Self::get_settings_path()?;
        Self::load_from_path(&settings_path)
    }

    /// Loads settings from a specific path; a missing file yields defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Returns the default settings path.
    pub fn get_settings_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".histview").join("settings.json"))
    }

    /// Returns an environment variable with fallback to settings.
    pub fn get_env_var(&self, key: &str) -> Option<String> {
        env::var(key).ok().or_else(|| self.env.get(key).cloned())
    }

    /// Effective commit limit: environment, then file, then the default.
    pub fn log_limit(&self) -> usize {
        self.log_limit_from(self.get_env_var(LOG_LIMIT_VAR))
    }

    fn log_limit_from(&self, env_value: Option<String>) -> usize {
        if let Some(raw) = env_value {
            match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => return limit,
                _ => warn!(value = %raw, var = LOG_LIMIT_VAR, "Ignoring invalid log limit"),
            }
        }
        self.log_limit
            .filter(|&limit| limit > 0)
            .unwrap_or(DEFAULT_LOG_LIMIT)
    }

    /// Whether terminal output should be coloured.
    pub fn color_enabled(&self) -> bool {
        if NO_COLOR_VARS
            .iter()
            .any(|key| self.get_env_var(key).is_some())
        {
            return false;
        }
        self.color.unwrap_or(true)
    }
}
