//! Initialization helpers for `.noteboard/` scaffolding.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};

use super::config::{BoardConfig, load_config, write_config};
use super::snapshot::write_board;
use crate::board::default_board;

/// Canonical paths within `.noteboard/` for a board root.
#[derive(Debug, Clone)]
pub struct BoardPaths {
    pub root: PathBuf,
    pub board_dir: PathBuf,
    pub config_path: PathBuf,
}

impl BoardPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let board_dir = root.join(".noteboard");
        Self {
            root: root.clone(),
            config_path: board_dir.join("config.toml"),
            board_dir,
        }
    }

    /// Load the config for this root (defaults when the file is missing).
    pub fn load_config(&self) -> Result<BoardConfig> {
        load_config(&self.config_path)
    }
}

/// Options for `init_board`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite an existing config and snapshot.
    pub force: bool,
}

/// Create `.noteboard/` with a default config and an empty board snapshot.
///
/// Fails if `.noteboard/` already exists unless `options.force` is set.
pub fn init_board(root: &Path, options: &InitOptions) -> Result<BoardPaths> {
    let paths = BoardPaths::new(root);
    if paths.board_dir.exists() && !paths.board_dir.is_dir() {
        return Err(anyhow!(
            "noteboard init: .noteboard exists but is not a directory"
        ));
    }
    if paths.board_dir.exists() && !options.force {
        return Err(anyhow!(
            "noteboard init: .noteboard already exists (use --force to overwrite)"
        ));
    }

    let cfg = BoardConfig::default();
    write_config(&paths.config_path, &cfg)?;
    write_board(&cfg.snapshot_path_in(&paths.root), &default_board())?;

    Ok(paths)
}
