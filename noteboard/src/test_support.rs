//! Test-only helpers for constructing boards and store collaborators.

use anyhow::{Result, anyhow};

use crate::board::{Board, Card, CardId, Column, ColumnKind, Item};
use crate::core::clock::Clock;
use crate::core::text::Text;
use crate::io::snapshot::SnapshotStore;

/// Timestamp produced by `FixedClock::default()`.
pub const FIXED_NOW: &str = "18.10.2026, 09:30:00";

/// Create a deterministic card with `items` open checklist items.
pub fn card(id: CardId, items: usize) -> Card {
    Card {
        id,
        title: format!("card {}", id),
        color: None,
        items: (1..=items).map(|n| Item::open(format!("item {}", n))).collect(),
        completed_date: None,
    }
}

/// Create a card whose first `completed` of `total` items are checked.
pub fn card_with_progress(id: CardId, completed: usize, total: usize) -> Card {
    let mut card = card(id, total);
    for item in card.items.iter_mut().take(completed) {
        item.completed = true;
    }
    card
}

/// Create a fully completed card stamped with `FIXED_NOW`.
pub fn done_card(id: CardId, items: usize) -> Card {
    let mut card = card_with_progress(id, items, items);
    card.completed_date = Some(FIXED_NOW.to_string());
    card
}

/// Build a board from explicit column contents; `nextCardId` follows the
/// highest id present.
pub fn board_with_columns(intake: Vec<Card>, in_progress: Vec<Card>, done: Vec<Card>) -> Board {
    let next_card_id = intake
        .iter()
        .chain(&in_progress)
        .chain(&done)
        .map(|card| card.id)
        .max()
        .map_or(1, |max| max + 1);
    let column = |kind: ColumnKind, cards: Vec<Card>| Column {
        title: kind.title().to_string(),
        cards,
    };
    Board {
        columns: [
            column(ColumnKind::Intake, intake),
            column(ColumnKind::InProgress, in_progress),
            column(ColumnKind::Done, done),
        ],
        next_card_id,
    }
}

/// Shorthand for a valid `Text`.
pub fn text(raw: &str) -> Text {
    Text::new(raw).expect("test text must not be blank")
}

/// Clock that always returns the same timestamp.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Default for FixedClock {
    fn default() -> Self {
        Self(FIXED_NOW.to_string())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}

/// Snapshot store whose writes always fail; loads start from nothing.
#[derive(Debug, Default)]
pub struct FailingSnapshotStore {
    pub attempts: usize,
}

impl SnapshotStore for FailingSnapshotStore {
    fn load(&self) -> Result<Option<Board>> {
        Ok(None)
    }

    fn save(&mut self, _board: &Board) -> Result<()> {
        self.attempts += 1;
        Err(anyhow!("storage unavailable"))
    }
}
