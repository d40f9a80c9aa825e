//! Derived intake lock status.

use crate::board::{Board, ColumnKind};
use crate::core::progression::is_ready_to_start;

/// True when In-Progress is at capacity and an intake card is ready to start.
///
/// While locked the intake column accepts no new cards and no edits to its
/// cards.
pub fn intake_locked(board: &Board) -> bool {
    board.is_full(ColumnKind::InProgress)
        && board
            .column(ColumnKind::Intake)
            .cards
            .iter()
            .any(is_ready_to_start)
}
