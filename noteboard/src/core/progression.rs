//! Checklist-driven card progression between columns.

use tracing::info;

use crate::board::{Board, Card, ColumnKind};
use crate::core::types::ProgressionSummary;

/// Completion rate at or above which an intake card is ready to start.
pub const START_THRESHOLD: f64 = 0.5;

/// Fraction of completed items; 0 for a card without items.
pub fn completion_rate(card: &Card) -> f64 {
    if card.items.is_empty() {
        return 0.0;
    }
    card.completed_count() as f64 / card.items.len() as f64
}

/// True if the card has at least one item and every item is completed.
pub fn is_complete(card: &Card) -> bool {
    !card.items.is_empty() && card.items.iter().all(|item| item.completed)
}

/// True if an intake card has progressed far enough to move to In-Progress.
pub fn is_ready_to_start(card: &Card) -> bool {
    !card.items.is_empty() && completion_rate(card) >= START_THRESHOLD
}

/// Run one progression pass.
///
/// Done-eligibility is evaluated before In-Progress-eligibility so a card is
/// never promoted twice and capacity freed by a Done promotion is visible to
/// the intake check. Each step promotes at most the first eligible card in
/// column order.
pub fn evaluate_progression(board: &mut Board, now: &str) -> ProgressionSummary {
    let mut summary = ProgressionSummary::default();

    let finished = board
        .column(ColumnKind::InProgress)
        .cards
        .iter()
        .position(is_complete);
    if let Some(index) = finished {
        let id = board.move_card(ColumnKind::InProgress, index, ColumnKind::Done);
        if let Some(card) = board.card_mut(id) {
            card.completed_date = Some(now.to_string());
        }
        info!(card_id = id, completed_date = now, "card moved to done");
        summary.completed = Some(id);
    }

    if !board.is_full(ColumnKind::InProgress) {
        let ready = board
            .column(ColumnKind::Intake)
            .cards
            .iter()
            .position(is_ready_to_start);
        if let Some(index) = ready {
            let id = board.move_card(ColumnKind::Intake, index, ColumnKind::InProgress);
            info!(card_id = id, "card moved to in-progress");
            summary.started = Some(id);
        }
    }

    summary
}
