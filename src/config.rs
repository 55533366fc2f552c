use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the config/log directory
pub const HOME_ENV: &str = "BOM_TUI_HOME";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Start with the sample garment BOM instead of an empty tree
    pub seed_demo_data: bool,
    /// Spaces per nesting level in the tree view
    pub indent_width: u16,
    /// Minimum tracing level written to the log file
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            indent_width: 2,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        if let Ok(dir) = env::var(HOME_ENV) {
            if !dir.is_empty() {
                return Some(PathBuf::from(dir));
            }
        }
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".bom-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn from_json(contents: &str) -> Option<Config> {
        serde_json::from_str(contents).ok()
    }

    /// Load the config, `None` if it is missing or unreadable
    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        Self::from_json(&contents)
    }

    /// Whether a config file is present on disk, valid or not
    pub fn exists() -> bool {
        Self::config_path().is_some_and(|path| path.exists())
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}
