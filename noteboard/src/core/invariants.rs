//! Semantic invariants not expressible via JSON Schema.

use std::collections::HashSet;

use crate::board::{Board, ColumnKind, MAX_ITEMS};

/// Check board invariants:
/// - Column card counts within capacity
/// - Every card holds 1..=5 items
/// - No duplicate card ids
/// - `completedDate` set iff the card is in Done
/// - `nextCardId` greater than every card id
pub fn validate_invariants(board: &Board) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for kind in ColumnKind::ALL {
        let column = board.column(kind);
        if let Some(capacity) = kind.capacity().filter(|cap| column.cards.len() > *cap) {
            errors.push(format!(
                "{}: holds {} cards, capacity is {}",
                column.title,
                column.cards.len(),
                capacity
            ));
        }

        for card in &column.cards {
            let path = format!("{}/{}", column.title, card.id);
            if !seen.insert(card.id) {
                errors.push(format!("duplicate card id {} at {}", card.id, path));
            }
            if card.items.is_empty() || card.items.len() > MAX_ITEMS {
                errors.push(format!(
                    "{}: holds {} items, expected 1..={}",
                    path,
                    card.items.len(),
                    MAX_ITEMS
                ));
            }
            match (kind, &card.completed_date) {
                (ColumnKind::Done, None) => {
                    errors.push(format!("{}: done card missing completedDate", path));
                }
                (ColumnKind::Intake | ColumnKind::InProgress, Some(_)) => {
                    errors.push(format!("{}: completedDate set outside done", path));
                }
                _ => {}
            }
            if card.id >= board.next_card_id {
                errors.push(format!(
                    "{}: id is not below nextCardId {}",
                    path, board.next_card_id
                ));
            }
        }
    }

    errors
}
