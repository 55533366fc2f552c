//! File logging
//!
//! stdout is owned by the terminal UI, so tracing output goes to
//! `bom-tui.log` in the config directory.

use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;

pub const LOG_FILE: &str = "bom-tui.log";

/// Parse a level name, falling back to `INFO`
pub fn parse_level(name: &str) -> Level {
    name.trim().parse().unwrap_or(Level::INFO)
}

/// Install the global subscriber, returning the log file path
pub fn init(config: &Config) -> Result<PathBuf> {
    let dir = Config::config_dir().context("Could not determine log directory")?;
    fs::create_dir_all(&dir)?;

    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(parse_level(&config.log_level))
        .try_init()
        .map_err(|e| anyhow!(e))?;

    Ok(path)
}
