//! Board snapshot persistence with schema + invariant validation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde_json::Value;
use tracing::debug;

use crate::board::Board;
use crate::core::invariants::validate_invariants;

const BOARD_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/board/v1.schema.json"
));

/// Persistence collaborator for the board store.
///
/// `load` returns `None` when nothing has been saved yet.
pub trait SnapshotStore {
    fn load(&self) -> Result<Option<Board>>;
    fn save(&mut self, board: &Board) -> Result<()>;
}

/// Snapshot kept as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<Board>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no snapshot on disk");
            return Ok(None);
        }
        load_board(&self.path).map(Some)
    }

    fn save(&mut self, board: &Board) -> Result<()> {
        write_board(&self.path, board)
    }
}

/// Snapshot kept as a serialized string in memory, like a browser key-value slot.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    slot: Option<String>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON currently stored, if any.
    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<Board>> {
        self.slot.as_deref().map(parse_board).transpose()
    }

    fn save(&mut self, board: &Board) -> Result<()> {
        self.slot = Some(serde_json::to_string(board).context("serialize board")?);
        Ok(())
    }
}

/// Load and validate a board snapshot from disk (schema + invariants).
pub fn load_board(path: &Path) -> Result<Board> {
    debug!(path = %path.display(), "loading board snapshot");
    let contents =
        fs::read_to_string(path).with_context(|| format!("read board {}", path.display()))?;
    parse_board(&contents).with_context(|| format!("load board {}", path.display()))
}

/// Parse a snapshot string and validate it. The result is taken verbatim.
pub fn parse_board(raw: &str) -> Result<Board> {
    let value: Value = serde_json::from_str(raw).context("parse board json")?;
    validate_schema(&value)?;
    let board: Board = serde_json::from_value(value).context("deserialize board")?;
    let errors = validate_invariants(&board);
    if !errors.is_empty() {
        return Err(anyhow!("board invariants failed: {}", errors.join("; ")));
    }
    Ok(board)
}

/// Atomically write a board snapshot to disk (temp file + rename).
pub fn write_board(path: &Path, board: &Board) -> Result<()> {
    debug!(path = %path.display(), next_card_id = board.next_card_id, "writing board snapshot");
    let mut buf = serde_json::to_string_pretty(board)?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("board path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp board {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace board {}", path.display()))?;
    Ok(())
}

fn validate_schema(board: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(BOARD_SCHEMA).context("parse board schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(board) {
        let messages = compiled
            .iter_errors(board)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "board schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}
