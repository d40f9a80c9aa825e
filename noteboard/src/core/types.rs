//! Shared deterministic types for board core logic.
//!
//! These types define stable contracts between the store, the pure transition
//! logic and UI collaborators. They must not depend on external state or I/O.

use thiserror::Error;

use crate::board::{CardId, ColumnKind};
use crate::core::text::{Color, Text};

/// Reason an intent was refused. A rejected intent leaves the board untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("cards can only be added to the intake column, not {0:?}")]
    WrongColumn(ColumnKind),
    #[error("intake column is full")]
    IntakeFull,
    #[error("intake column is locked until in-progress has room")]
    IntakeLocked,
    #[error("card {0} not found")]
    CardNotFound(CardId),
    #[error("card {card_id} has no item at index {index}")]
    ItemNotFound { card_id: CardId, index: usize },
    #[error("card {0} already holds the maximum number of items")]
    ChecklistFull(CardId),
    #[error("card {0} is done; its checklist is frozen")]
    CardFinished(CardId),
    #[error("card ids are exhausted")]
    IdsExhausted,
    #[error("text must not be empty")]
    EmptyText,
    #[error("invalid color '{0}' (expected #rgb or #rrggbb)")]
    InvalidColor(String),
}

impl Rejection {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::WrongColumn(_) => "wrong-column",
            Rejection::IntakeFull => "intake-full",
            Rejection::IntakeLocked => "intake-locked",
            Rejection::CardNotFound(_) => "not-found",
            Rejection::ItemNotFound { .. } => "item-not-found",
            Rejection::ChecklistFull(_) => "checklist-full",
            Rejection::CardFinished(_) => "card-finished",
            Rejection::IdsExhausted => "ids-exhausted",
            Rejection::EmptyText => "empty-text",
            Rejection::InvalidColor(_) => "invalid-color",
        }
    }
}

/// A user intent raised by a UI collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Create a card. `title: None` falls back to `Card <id>`; no items falls
    /// back to the three default items.
    AddCard {
        column: ColumnKind,
        title: Option<Text>,
        items: Vec<Text>,
    },
    RemoveCard {
        card_id: CardId,
    },
    AddItem {
        card_id: CardId,
        text: Text,
    },
    ToggleItem {
        card_id: CardId,
        index: usize,
    },
    EditItem {
        card_id: CardId,
        index: usize,
        text: Text,
    },
    EditTitle {
        card_id: CardId,
        title: Text,
    },
    EditColor {
        card_id: CardId,
        color: Option<Color>,
    },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::AddCard { .. } => "add_card",
            Intent::RemoveCard { .. } => "remove_card",
            Intent::AddItem { .. } => "add_item",
            Intent::ToggleItem { .. } => "toggle_item",
            Intent::EditItem { .. } => "edit_item",
            Intent::EditTitle { .. } => "edit_title",
            Intent::EditColor { .. } => "edit_color",
        }
    }
}

/// Card movements performed by one progression pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressionSummary {
    /// Card promoted from In-Progress to Done.
    pub completed: Option<CardId>,
    /// Card promoted from Intake to In-Progress.
    pub started: Option<CardId>,
}

impl ProgressionSummary {
    pub fn is_empty(&self) -> bool {
        self.completed.is_none() && self.started.is_none()
    }
}

/// Outcome of an accepted intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Applied {
    /// Id allocated by `AddCard`.
    pub created: Option<CardId>,
    pub progression: ProgressionSummary,
}
