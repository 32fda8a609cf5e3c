//! Config commands

use super::presets::rule_rows;
use crate::config::Config;
use crate::output::{self, OutputFormat};
use crate::ConfigCommands;
use anyhow::{bail, Result};
use colored::Colorize;
use promptfence_core::{Preset, StoredConfig};

pub fn handle(action: ConfigCommands, profile: Option<&str>, format: OutputFormat) -> Result<()> {
    match action {
        ConfigCommands::Init { force } => {
            let path = Config::config_path(profile)?;
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            let config = Config {
                policy: StoredConfig {
                    preset: Some(Preset::DEFAULT_ID.to_string()),
                    enable_warn: Some(true),
                    enable_block: Some(true),
                    ..Default::default()
                },
                ..Default::default()
            };
            config.save_to(&path)?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Show => {
            let config = Config::load(profile)?;
            let policy = config.policy.resolve();
            if !format.is_table() {
                return format.print(&StoredConfig::from(&policy));
            }
            println!("preset: {}", policy.preset.id);
            println!("enable_warn: {}", policy.enable_warn);
            println!("enable_block: {}", policy.enable_block);
            if policy.has_overrides() {
                println!("{}", "rules overridden in config".yellow());
            }
            println!("{}", output::table(rule_rows(policy.rules.iter())));
            println!("ai_domains: {}", config.ai_domains().hosts().join(", "));
        }
        ConfigCommands::SetPreset { id } => {
            let Some(preset) = Preset::by_id(&id) else {
                bail!("Unknown preset: {}", id);
            };
            let mut config = Config::load(profile)?;
            config.policy.preset = Some(preset.id.to_string());
            let path = config.save(profile)?;
            println!("Preset set to {} in {}", preset.id, path.display());
        }
    }
    Ok(())
}
