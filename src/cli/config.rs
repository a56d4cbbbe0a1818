//! `histview config`: the settings in effect.

use std::collections::BTreeMap;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::data::to_yaml;
use crate::utils::Settings;

/// Config command options.
#[derive(Parser)]
pub struct ConfigCommand {}

/// Settings after environment overrides are applied.
#[derive(Debug, Serialize)]
struct EffectiveConfig {
    settings_path: String,
    log_limit: usize,
    color: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    env: BTreeMap<String, String>,
}

impl EffectiveConfig {
    fn new(settings: &Settings, settings_path: String) -> Self {
        Self {
            settings_path,
            log_limit: settings.log_limit(),
            color: settings.color_enabled(),
            env: settings
                .env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        let path = Settings::get_settings_path()?;
        let settings = Settings::load_from_path(&path)?;
        let config = EffectiveConfig::new(&settings, path.display().to_string());
        print!("{}", to_yaml(&config)?);
        Ok(())
    }
}
