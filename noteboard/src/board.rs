use serde::{Deserialize, Serialize};

/// Stable identifier of a card, allocated from `Board::next_card_id`.
pub type CardId = u64;

/// Maximum number of checklist items a card may hold.
pub const MAX_ITEMS: usize = 5;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub text: String,
    pub completed: bool,
}

impl Item {
    pub fn open(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub items: Vec<Item>,
    #[serde(default)]
    pub completed_date: Option<String>,
}

impl Card {
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    pub fn is_checklist_full(&self) -> bool {
        self.items.len() >= MAX_ITEMS
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub cards: Vec<Card>,
}

impl Column {
    pub fn empty(kind: ColumnKind) -> Self {
        Self {
            title: kind.title().to_string(),
            cards: Vec::new(),
        }
    }

    pub fn position(&self, card_id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == card_id)
    }
}

/// Positional identity of the three fixed columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnKind {
    Intake,
    InProgress,
    Done,
}

impl ColumnKind {
    pub const ALL: [ColumnKind; 3] = [ColumnKind::Intake, ColumnKind::InProgress, ColumnKind::Done];

    pub fn index(self) -> usize {
        match self {
            ColumnKind::Intake => 0,
            ColumnKind::InProgress => 1,
            ColumnKind::Done => 2,
        }
    }

    /// Maximum number of cards the column accepts; `None` means unbounded.
    pub fn capacity(self) -> Option<usize> {
        match self {
            ColumnKind::Intake => Some(3),
            ColumnKind::InProgress => Some(5),
            ColumnKind::Done => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ColumnKind::Intake => "Intake",
            ColumnKind::InProgress => "In Progress",
            ColumnKind::Done => "Done",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub columns: [Column; 3],
    pub next_card_id: CardId,
}

impl Board {
    pub fn column(&self, kind: ColumnKind) -> &Column {
        &self.columns[kind.index()]
    }

    pub fn column_mut(&mut self, kind: ColumnKind) -> &mut Column {
        &mut self.columns[kind.index()]
    }

    pub fn is_full(&self, kind: ColumnKind) -> bool {
        kind.capacity()
            .is_some_and(|capacity| self.column(kind).cards.len() >= capacity)
    }

    /// Locate a card, searching Intake, In-Progress, then Done.
    pub fn locate(&self, card_id: CardId) -> Option<(ColumnKind, usize)> {
        ColumnKind::ALL.into_iter().find_map(|kind| {
            self.column(kind)
                .position(card_id)
                .map(|index| (kind, index))
        })
    }

    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        let (kind, index) = self.locate(card_id)?;
        Some(&self.column(kind).cards[index])
    }

    pub fn card_mut(&mut self, card_id: CardId) -> Option<&mut Card> {
        let (kind, index) = self.locate(card_id)?;
        Some(&mut self.column_mut(kind).cards[index])
    }

    /// Transfer the card at `index` of `from` to the tail of `to`.
    pub fn move_card(&mut self, from: ColumnKind, index: usize, to: ColumnKind) -> CardId {
        let card = self.column_mut(from).cards.remove(index);
        let id = card.id;
        self.column_mut(to).cards.push(card);
        id
    }

    pub fn cards(&self) -> impl Iterator<Item = (ColumnKind, &Card)> {
        ColumnKind::ALL
            .into_iter()
            .flat_map(move |kind| self.column(kind).cards.iter().map(move |card| (kind, card)))
    }
}

pub fn default_board() -> Board {
    Board {
        columns: ColumnKind::ALL.map(Column::empty),
        next_card_id: 1,
    }
}
