//! Board state store: the single owner of the board.
//!
//! Every intent runs to completion in order: validation and mutation (pure,
//! in [`crate::core::state_update`]), progression, persistence, then one
//! "state changed" notification. Rejected intents skip the last two steps.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::board::{Board, CardId, ColumnKind, default_board};
use crate::core::clock::Clock;
use crate::core::lock::intake_locked;
use crate::core::state_update::apply_intent;
use crate::core::text::{Color, Text};
use crate::core::types::{Applied, Intent, Rejection};
use crate::io::snapshot::SnapshotStore;

/// Read-only projection handed to renderers and observers.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView<'a> {
    #[serde(flatten)]
    pub board: &'a Board,
    pub intake_locked: bool,
}

type Observer = Box<dyn FnMut(&BoardView<'_>)>;

pub struct BoardStore<S: SnapshotStore> {
    board: Board,
    snapshots: S,
    clock: Box<dyn Clock>,
    observers: Vec<Observer>,
}

impl<S: SnapshotStore> BoardStore<S> {
    /// Open the store from the persisted snapshot, or an empty board if none.
    pub fn open(snapshots: S, clock: Box<dyn Clock>) -> Result<Self> {
        let board = snapshots
            .load()
            .context("load board snapshot")?
            .unwrap_or_else(default_board);
        debug!(
            next_card_id = board.next_card_id,
            intake_locked = intake_locked(&board),
            "board store opened"
        );
        Ok(Self {
            board,
            snapshots,
            clock,
            observers: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn intake_locked(&self) -> bool {
        intake_locked(&self.board)
    }

    pub fn view(&self) -> BoardView<'_> {
        BoardView {
            board: &self.board,
            intake_locked: self.intake_locked(),
        }
    }

    pub fn snapshots(&self) -> &S {
        &self.snapshots
    }

    /// Register a callback run once after every accepted intent.
    pub fn subscribe(&mut self, observer: impl FnMut(&BoardView<'_>) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Apply one intent. On `Err` the board is unchanged, nothing is
    /// persisted and no observer runs.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Applied, Rejection> {
        let name = intent.name();
        match apply_intent(&mut self.board, intent, self.clock.as_ref()) {
            Ok(applied) => {
                info!(
                    intent = name,
                    created = ?applied.created,
                    completed = ?applied.progression.completed,
                    started = ?applied.progression.started,
                    "intent applied"
                );
                self.persist();
                self.notify();
                Ok(applied)
            }
            Err(rejection) => {
                warn!(intent = name, reason = rejection.code(), "intent rejected: {}", rejection);
                Err(rejection)
            }
        }
    }

    pub fn add_card(
        &mut self,
        column: ColumnKind,
        title: Option<Text>,
        items: Vec<Text>,
    ) -> Result<Applied, Rejection> {
        self.dispatch(Intent::AddCard {
            column,
            title,
            items,
        })
    }

    pub fn remove_card(&mut self, card_id: CardId) -> Result<Applied, Rejection> {
        self.dispatch(Intent::RemoveCard { card_id })
    }

    pub fn add_item(&mut self, card_id: CardId, text: Text) -> Result<Applied, Rejection> {
        self.dispatch(Intent::AddItem { card_id, text })
    }

    pub fn toggle_item(&mut self, card_id: CardId, index: usize) -> Result<Applied, Rejection> {
        self.dispatch(Intent::ToggleItem { card_id, index })
    }

    pub fn edit_item(
        &mut self,
        card_id: CardId,
        index: usize,
        text: Text,
    ) -> Result<Applied, Rejection> {
        self.dispatch(Intent::EditItem {
            card_id,
            index,
            text,
        })
    }

    pub fn edit_title(&mut self, card_id: CardId, title: Text) -> Result<Applied, Rejection> {
        self.dispatch(Intent::EditTitle { card_id, title })
    }

    pub fn edit_color(
        &mut self,
        card_id: CardId,
        color: Option<Color>,
    ) -> Result<Applied, Rejection> {
        self.dispatch(Intent::EditColor { card_id, color })
    }

    /// Write failures are logged and swallowed; the in-memory board stays
    /// authoritative.
    fn persist(&mut self) {
        if let Err(err) = self.snapshots.save(&self.board) {
            error!(error = %format!("{err:#}"), "failed to persist board snapshot");
        }
    }

    fn notify(&mut self) {
        let view = BoardView {
            board: &self.board,
            intake_locked: intake_locked(&self.board),
        };
        for observer in &mut self.observers {
            observer(&view);
        }
    }
}
