//! CLI Configuration

use anyhow::{Context, Result};
use promptfence_core::{AiDomains, StoredConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of `~/.promptfence/config[.<profile>].toml`
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Hosts treated as AI assistants; defaults apply when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_domains: Option<Vec<String>>,

    /// Stored policy settings
    #[serde(default)]
    pub policy: StoredConfig,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self> {
        Self::load_from(&Self::config_path(profile)?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf> {
        let path = Self::config_path(profile)?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))
    }

    pub fn ai_domains(&self) -> AiDomains {
        match &self.ai_domains {
            Some(hosts) => AiDomains::new(hosts.iter().cloned()),
            None => AiDomains::default(),
        }
    }

    pub fn config_path(profile: Option<&str>) -> Result<PathBuf> {
        let home = dirs::home_dir().context("Cannot find home directory")?;
        Ok(home.join(".promptfence").join(Self::file_name(profile)))
    }

    fn file_name(profile: Option<&str>) -> String {
        match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        }
    }
}
