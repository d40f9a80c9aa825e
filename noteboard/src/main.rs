//! Checklist-driven kanban note board.
//!
//! Keeps a board snapshot (`.noteboard/board.json` by default) with three
//! columns. Each intent subcommand applies exactly one change, lets cards
//! progress, saves the snapshot and prints the resulting board.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use noteboard::board::{CardId, ColumnKind};
use noteboard::core::clock::SystemClock;
use noteboard::core::text::{Color, Text};
use noteboard::core::types::Intent;
use noteboard::exit_codes;
use noteboard::io::init::{BoardPaths, InitOptions, init_board};
use noteboard::io::render::BoardRenderer;
use noteboard::io::snapshot::{FileSnapshotStore, load_board};
use noteboard::logging;
use noteboard::store::BoardStore;

#[derive(Parser)]
#[command(
    name = "noteboard",
    version,
    about = "Kanban note board whose cards advance as their checklists fill up"
)]
struct Cli {
    /// Directory holding `.noteboard/`.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Print the board as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `.noteboard/config.toml` and an empty board snapshot.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the board.
    Show,
    /// Check the snapshot against the schema and board invariants.
    Validate,
    /// Add a card to the intake column.
    AddCard {
        /// Card title (defaults to `Card <id>`).
        #[arg(short, long)]
        title: Option<Text>,
        /// Checklist items (at most five are kept; defaults to three placeholders).
        items: Vec<Text>,
    },
    /// Remove a card from whichever column holds it.
    Remove { id: CardId },
    /// Flip the completion of a checklist item (0-based index).
    Toggle { id: CardId, index: usize },
    /// Append a checklist item to a card.
    AddItem { id: CardId, text: Text },
    /// Replace the text of a checklist item (0-based index).
    EditItem { id: CardId, index: usize, text: Text },
    /// Rename a card.
    Title { id: CardId, text: Text },
    /// Set a card color (`#rgb` / `#rrggbb`); omit to clear it.
    Color { id: CardId, color: Option<Color> },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let paths = BoardPaths::new(&cli.root);
    let intent = match cli.command {
        Command::Init { force } => return cmd_init(&cli.root, force),
        Command::Show => return cmd_show(&paths, cli.json),
        Command::Validate => return cmd_validate(&paths),
        Command::AddCard { title, items } => Intent::AddCard {
            column: ColumnKind::Intake,
            title,
            items,
        },
        Command::Remove { id } => Intent::RemoveCard { card_id: id },
        Command::Toggle { id, index } => Intent::ToggleItem { card_id: id, index },
        Command::AddItem { id, text } => Intent::AddItem { card_id: id, text },
        Command::EditItem { id, index, text } => Intent::EditItem {
            card_id: id,
            index,
            text,
        },
        Command::Title { id, text } => Intent::EditTitle {
            card_id: id,
            title: text,
        },
        Command::Color { id, color } => Intent::EditColor { card_id: id, color },
    };
    cmd_apply(&paths, intent, cli.json)
}

fn cmd_init(root: &Path, force: bool) -> Result<i32> {
    let paths = init_board(root, &InitOptions { force })?;
    println!("initialized {}", paths.board_dir.display());
    Ok(exit_codes::OK)
}

fn cmd_show(paths: &BoardPaths, json: bool) -> Result<i32> {
    let store = open_store(paths)?;
    print_board(&store, json)?;
    Ok(exit_codes::OK)
}

fn cmd_validate(paths: &BoardPaths) -> Result<i32> {
    let cfg = paths.load_config()?;
    let snapshot_path = cfg.snapshot_path_in(&paths.root);
    load_board(&snapshot_path)?;
    println!("ok: {}", snapshot_path.display());
    Ok(exit_codes::OK)
}

fn cmd_apply(paths: &BoardPaths, intent: Intent, json: bool) -> Result<i32> {
    let mut store = open_store(paths)?;
    match store.dispatch(intent) {
        Ok(applied) => {
            if let Some(id) = applied.created {
                eprintln!("created card {}", id);
            }
            if let Some(id) = applied.progression.completed {
                eprintln!("card {} moved to done", id);
            }
            if let Some(id) = applied.progression.started {
                eprintln!("card {} moved to in progress", id);
            }
            print_board(&store, json)?;
            Ok(exit_codes::OK)
        }
        Err(rejection) => {
            eprintln!("rejected ({}): {}", rejection.code(), rejection);
            Ok(exit_codes::REJECTED)
        }
    }
}

fn open_store(paths: &BoardPaths) -> Result<BoardStore<FileSnapshotStore>> {
    let cfg = paths.load_config()?;
    let snapshots = FileSnapshotStore::new(cfg.snapshot_path_in(&paths.root));
    BoardStore::open(snapshots, Box::new(SystemClock::new(cfg.timestamp_format)))
        .context("open board")
}

fn print_board(store: &BoardStore<FileSnapshotStore>, json: bool) -> Result<()> {
    if json {
        let payload = serde_json::to_string_pretty(&store.view()).context("serialize board")?;
        println!("{}", payload);
    } else {
        let rendered = BoardRenderer::new().render(store.board(), store.intake_locked())?;
        print!("{}", rendered);
    }
    Ok(())
}
