//! Board configuration stored under `.noteboard/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Board configuration (TOML).
///
/// Missing fields default to sensible values; paths are relative to the board
/// root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BoardConfig {
    /// Where the board snapshot is persisted.
    pub snapshot_path: PathBuf,

    /// `chrono` format string used to stamp `completedDate`.
    pub timestamp_format: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(".noteboard/board.json"),
            timestamp_format: "%d.%m.%Y, %H:%M:%S".to_string(),
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.snapshot_path.as_os_str().is_empty() {
            return Err(anyhow!("snapshot_path must not be empty"));
        }
        if self.timestamp_format.trim().is_empty() {
            return Err(anyhow!("timestamp_format must not be empty"));
        }
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(anyhow!(
                "timestamp_format '{}' is not a valid strftime format",
                self.timestamp_format
            ));
        }
        Ok(())
    }

    /// Snapshot location resolved against `root`.
    pub fn snapshot_path_in(&self, root: &Path) -> PathBuf {
        root.join(&self.snapshot_path)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `BoardConfig::default()`.
pub fn load_config(path: &Path) -> Result<BoardConfig> {
    if !path.exists() {
        let cfg = BoardConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: BoardConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &BoardConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
