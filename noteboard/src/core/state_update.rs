//! Intent-driven state transitions for the board.

use crate::board::{Board, Card, CardId, ColumnKind, Item, MAX_ITEMS};
use crate::core::clock::Clock;
use crate::core::lock::intake_locked;
use crate::core::progression::evaluate_progression;
use crate::core::text::{Color, Text};
use crate::core::types::{Applied, Intent, ProgressionSummary, Rejection};

/// Number of placeholder items a card gets when created without any.
pub const DEFAULT_ITEM_COUNT: usize = 3;

/// Apply `intent` to `board`.
///
/// All validation happens before the first mutation, so an `Err` leaves the
/// board exactly as it was. Item toggles are followed by a progression pass.
pub fn apply_intent(
    board: &mut Board,
    intent: Intent,
    clock: &dyn Clock,
) -> Result<Applied, Rejection> {
    match intent {
        Intent::AddCard {
            column,
            title,
            items,
        } => add_card(board, column, title, items),
        Intent::RemoveCard { card_id } => remove_card(board, card_id),
        Intent::AddItem { card_id, text } => add_item(board, card_id, text),
        Intent::ToggleItem { card_id, index } => toggle_item(board, card_id, index, clock),
        Intent::EditItem {
            card_id,
            index,
            text,
        } => edit_item(board, card_id, index, text),
        Intent::EditTitle { card_id, title } => edit_title(board, card_id, title),
        Intent::EditColor { card_id, color } => edit_color(board, card_id, color),
    }
}

fn add_card(
    board: &mut Board,
    column: ColumnKind,
    title: Option<Text>,
    items: Vec<Text>,
) -> Result<Applied, Rejection> {
    if column != ColumnKind::Intake {
        return Err(Rejection::WrongColumn(column));
    }
    if intake_locked(board) {
        return Err(Rejection::IntakeLocked);
    }
    if board.is_full(ColumnKind::Intake) {
        return Err(Rejection::IntakeFull);
    }

    let id = board.next_card_id;
    let next_card_id = id.checked_add(1).ok_or(Rejection::IdsExhausted)?;
    let items = if items.is_empty() {
        (1..=DEFAULT_ITEM_COUNT)
            .map(|n| Item::open(format!("Item {n}")))
            .collect()
    } else {
        items
            .into_iter()
            .take(MAX_ITEMS)
            .map(|text| Item::open(text.into_string()))
            .collect()
    };
    let card = Card {
        id,
        title: title.map_or_else(|| format!("Card {id}"), Text::into_string),
        color: None,
        items,
        completed_date: None,
    };
    board.column_mut(ColumnKind::Intake).cards.push(card);
    board.next_card_id = next_card_id;

    Ok(Applied {
        created: Some(id),
        progression: ProgressionSummary::default(),
    })
}

fn remove_card(board: &mut Board, card_id: CardId) -> Result<Applied, Rejection> {
    let (column, index) = locate_editable(board, card_id)?;
    board.column_mut(column).cards.remove(index);
    Ok(Applied::default())
}

fn add_item(board: &mut Board, card_id: CardId, text: Text) -> Result<Applied, Rejection> {
    let card = checklist_card_mut(board, card_id)?;
    if card.is_checklist_full() {
        return Err(Rejection::ChecklistFull(card_id));
    }
    card.items.push(Item::open(text.into_string()));
    Ok(Applied::default())
}

fn toggle_item(
    board: &mut Board,
    card_id: CardId,
    index: usize,
    clock: &dyn Clock,
) -> Result<Applied, Rejection> {
    let card = checklist_card_mut(board, card_id)?;
    let item = card
        .items
        .get_mut(index)
        .ok_or(Rejection::ItemNotFound { card_id, index })?;
    item.completed = !item.completed;

    let progression = evaluate_progression(board, &clock.now());
    Ok(Applied {
        created: None,
        progression,
    })
}

fn edit_item(
    board: &mut Board,
    card_id: CardId,
    index: usize,
    text: Text,
) -> Result<Applied, Rejection> {
    let card = checklist_card_mut(board, card_id)?;
    let item = card
        .items
        .get_mut(index)
        .ok_or(Rejection::ItemNotFound { card_id, index })?;
    item.text = text.into_string();
    Ok(Applied::default())
}

fn edit_title(board: &mut Board, card_id: CardId, title: Text) -> Result<Applied, Rejection> {
    let (column, index) = locate_editable(board, card_id)?;
    board.column_mut(column).cards[index].title = title.into_string();
    Ok(Applied::default())
}

fn edit_color(
    board: &mut Board,
    card_id: CardId,
    color: Option<Color>,
) -> Result<Applied, Rejection> {
    let card = board
        .card_mut(card_id)
        .ok_or(Rejection::CardNotFound(card_id))?;
    card.color = color.map(Color::into_string);
    Ok(Applied::default())
}

/// Locate a card whose content may change, honoring the intake lock.
fn locate_editable(board: &Board, card_id: CardId) -> Result<(ColumnKind, usize), Rejection> {
    let (column, index) = board
        .locate(card_id)
        .ok_or(Rejection::CardNotFound(card_id))?;
    if column == ColumnKind::Intake && intake_locked(board) {
        return Err(Rejection::IntakeLocked);
    }
    Ok((column, index))
}

/// Card whose checklist may change: editable and not yet done.
fn checklist_card_mut(board: &mut Board, card_id: CardId) -> Result<&mut Card, Rejection> {
    let (column, index) = locate_editable(board, card_id)?;
    if column == ColumnKind::Done {
        return Err(Rejection::CardFinished(card_id));
    }
    Ok(&mut board.column_mut(column).cards[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::default_board;
    use crate::test_support::{
        FixedClock, board_with_columns, card, card_with_progress, done_card, text,
    };

    fn apply(board: &mut Board, intent: Intent) -> Result<Applied, Rejection> {
        apply_intent(board, intent, &FixedClock::default())
    }

    fn add(title: &str, items: &[&str]) -> Intent {
        Intent::AddCard {
            column: ColumnKind::Intake,
            title: Some(text(title)),
            items: items.iter().map(|t| text(t)).collect(),
        }
    }

    /// Full intake with a ready card and full in-progress locks intake.
    fn locked_board() -> Board {
        board_with_columns(
            vec![card(1, 3), card(2, 3), card_with_progress(3, 3, 5)],
            (10..15).map(|id| card(id, 3)).collect(),
            vec![done_card(20, 2)],
        )
    }

    #[test]
    fn add_card_allocates_ids_and_appends_to_intake() {
        let mut board = default_board();

        let first = apply(&mut board, add("first", &["a", "b"])).expect("add");
        let second = apply(&mut board, add("second", &["c"])).expect("add");

        assert_eq!(first.created, Some(1));
        assert_eq!(second.created, Some(2));
        assert_eq!(board.next_card_id, 3);
        let intake = &board.column(ColumnKind::Intake).cards;
        assert_eq!(intake[0].title, "first");
        assert_eq!(intake[0].items, vec![Item::open("a"), Item::open("b")]);
        assert_eq!(intake[1].id, 2);
        assert_eq!(intake[1].completed_date, None);
    }

    #[test]
    fn add_card_keeps_first_five_items() {
        let mut board = default_board();
        apply(&mut board, add("t", &["1", "2", "3", "4", "5", "6", "7"])).expect("add");
        let texts: Vec<&str> = board.column(ColumnKind::Intake).cards[0]
            .items
            .iter()
            .map(|i| i.text.as_str())
            .collect();
        assert_eq!(texts, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn add_card_without_title_or_items_uses_defaults() {
        let mut board = default_board();
        board.next_card_id = 7;
        let intent = Intent::AddCard {
            column: ColumnKind::Intake,
            title: None,
            items: Vec::new(),
        };

        apply(&mut board, intent).expect("add");

        let created = &board.column(ColumnKind::Intake).cards[0];
        assert_eq!(created.title, "Card 7");
        assert_eq!(created.items.len(), DEFAULT_ITEM_COUNT);
        assert_eq!(created.items[2].text, "Item 3");
    }

    #[test]
    fn add_card_rejected_outside_intake() {
        let mut board = default_board();
        let intent = Intent::AddCard {
            column: ColumnKind::InProgress,
            title: None,
            items: Vec::new(),
        };
        assert_eq!(
            apply(&mut board, intent),
            Err(Rejection::WrongColumn(ColumnKind::InProgress))
        );
        assert_eq!(board, default_board());
    }

    #[test]
    fn add_card_rejected_when_intake_full() {
        let mut board = board_with_columns(vec![card(1, 3), card(2, 3), card(3, 3)], vec![], vec![]);
        board.next_card_id = 4;
        let before = board.clone();

        assert_eq!(apply(&mut board, add("x", &["a"])), Err(Rejection::IntakeFull));
        assert_eq!(board, before);
    }

    #[test]
    fn locked_intake_rejects_add_card() {
        let mut board = locked_board();
        let before = board.clone();

        assert_eq!(apply(&mut board, add("x", &["a"])), Err(Rejection::IntakeLocked));
        assert_eq!(board, before);
    }

    #[test]
    fn locked_intake_rejects_edits_to_intake_cards() {
        let mut board = locked_board();
        let before = board.clone();

        let intents = vec![
            Intent::AddItem {
                card_id: 1,
                text: text("more"),
            },
            Intent::ToggleItem {
                card_id: 3,
                index: 4,
            },
            Intent::EditTitle {
                card_id: 2,
                title: text("renamed"),
            },
            Intent::RemoveCard { card_id: 1 },
        ];
        for intent in intents {
            assert_eq!(apply(&mut board, intent), Err(Rejection::IntakeLocked));
        }
        assert_eq!(board, before);
    }

    #[test]
    fn locked_intake_still_allows_color_on_intake_cards() {
        let mut board = locked_board();

        apply(
            &mut board,
            Intent::EditColor {
                card_id: 1,
                color: Some(Color::new("#123").expect("color")),
            },
        )
        .expect("edit color");

        assert_eq!(board.locate(1), Some((ColumnKind::Intake, 0)));
        assert_eq!(board.card(1).expect("card").color.as_deref(), Some("#123"));
    }

    #[test]
    fn locked_intake_still_allows_in_progress_edits() {
        let mut board = locked_board();

        apply(
            &mut board,
            Intent::EditTitle {
                card_id: 10,
                title: text("still editable"),
            },
        )
        .expect("edit title");

        assert_eq!(board.card(10).expect("card").title, "still editable");
    }

    #[test]
    fn finishing_in_progress_card_unblocks_locked_intake() {
        let mut board = locked_board();
        for index in 0..3 {
            apply(
                &mut board,
                Intent::ToggleItem {
                    card_id: 10,
                    index,
                },
            )
            .expect("toggle");
        }

        let done: Vec<CardId> = board.column(ColumnKind::Done).cards.iter().map(|c| c.id).collect();
        assert_eq!(done, vec![20, 10]);
        assert_eq!(board.locate(3), Some((ColumnKind::InProgress, 4)));
        assert!(!intake_locked(&board));
    }

    #[test]
    fn remove_card_takes_card_from_any_column() {
        let mut board = locked_board();
        apply(&mut board, Intent::RemoveCard { card_id: 20 }).expect("remove");
        assert_eq!(board.card(20), None);
        assert!(board.column(ColumnKind::Done).cards.is_empty());
    }

    #[test]
    fn remove_missing_card_is_rejected() {
        let mut board = default_board();
        assert_eq!(
            apply(&mut board, Intent::RemoveCard { card_id: 42 }),
            Err(Rejection::CardNotFound(42))
        );
    }

    #[test]
    fn add_item_rejected_when_checklist_full() {
        let mut board = board_with_columns(vec![card(1, 5)], vec![], vec![]);
        let intent = Intent::AddItem {
            card_id: 1,
            text: text("sixth"),
        };

        assert_eq!(apply(&mut board, intent), Err(Rejection::ChecklistFull(1)));
        assert_eq!(board.card(1).expect("card").items.len(), 5);
    }

    #[test]
    fn add_item_does_not_trigger_progression() {
        let mut board = board_with_columns(vec![card_with_progress(1, 1, 1)], vec![], vec![]);
        apply(
            &mut board,
            Intent::AddItem {
                card_id: 1,
                text: text("new"),
            },
        )
        .expect("add item");

        assert_eq!(board.locate(1), Some((ColumnKind::Intake, 0)));
        assert_eq!(board.card(1).expect("card").items.last(), Some(&Item::open("new")));
    }

    #[test]
    fn done_checklist_is_frozen() {
        let mut board = board_with_columns(vec![], vec![], vec![done_card(1, 2)]);
        let before = board.clone();

        let toggle = Intent::ToggleItem {
            card_id: 1,
            index: 0,
        };
        let add_item = Intent::AddItem {
            card_id: 1,
            text: text("late"),
        };
        assert_eq!(apply(&mut board, toggle), Err(Rejection::CardFinished(1)));
        assert_eq!(apply(&mut board, add_item), Err(Rejection::CardFinished(1)));
        assert_eq!(board, before);
    }

    #[test]
    fn done_card_title_and_color_stay_editable() {
        let mut board = board_with_columns(vec![], vec![], vec![done_card(1, 2)]);
        let date = board.card(1).expect("card").completed_date.clone();

        apply(
            &mut board,
            Intent::EditTitle {
                card_id: 1,
                title: text("archived"),
            },
        )
        .expect("title");
        apply(
            &mut board,
            Intent::EditColor {
                card_id: 1,
                color: Some(Color::new("#FF0000").expect("color")),
            },
        )
        .expect("color");

        let card = board.card(1).expect("card");
        assert_eq!(card.title, "archived");
        assert_eq!(card.color.as_deref(), Some("#ff0000"));
        assert_eq!(card.completed_date, date);
    }

    #[test]
    fn toggle_out_of_range_is_rejected() {
        let mut board = board_with_columns(vec![card(1, 2)], vec![], vec![]);
        assert_eq!(
            apply(
                &mut board,
                Intent::ToggleItem {
                    card_id: 1,
                    index: 2
                }
            ),
            Err(Rejection::ItemNotFound {
                card_id: 1,
                index: 2
            })
        );
    }

    #[test]
    fn toggle_reports_progression() {
        let mut board = board_with_columns(vec![card_with_progress(1, 1, 3)], vec![], vec![]);
        let applied = apply(
            &mut board,
            Intent::ToggleItem {
                card_id: 1,
                index: 1,
            },
        )
        .expect("toggle");

        assert_eq!(applied.progression.started, Some(1));
        assert_eq!(board.locate(1), Some((ColumnKind::InProgress, 0)));
    }

    #[test]
    fn untoggling_in_progress_card_never_moves_it_back() {
        let mut board = board_with_columns(vec![], vec![card_with_progress(1, 2, 3)], vec![]);
        for index in 0..2 {
            apply(&mut board, Intent::ToggleItem { card_id: 1, index }).expect("toggle");
        }
        assert_eq!(board.locate(1), Some((ColumnKind::InProgress, 0)));
        assert_eq!(board.card(1).expect("card").completed_count(), 0);
    }

    #[test]
    fn add_card_rejected_when_ids_are_exhausted() {
        let mut board = default_board();
        board.next_card_id = CardId::MAX;
        let before = board.clone();

        let result = apply(&mut board, add("last", &["a"]));

        assert_eq!(result, Err(Rejection::IdsExhausted));
        assert_eq!(board, before);
    }

    #[test]
    fn edit_item_replaces_text_without_progression() {
        let mut board = board_with_columns(vec![card_with_progress(1, 1, 2)], vec![], vec![]);

        let applied = apply(
            &mut board,
            Intent::EditItem {
                card_id: 1,
                index: 1,
                text: text("renamed item"),
            },
        )
        .expect("edit item");

        assert!(applied.progression.is_empty());
        let card = board.card(1).expect("card");
        assert_eq!(card.items[1].text, "renamed item");
        assert!(!card.items[1].completed);
        assert_eq!(board.locate(1), Some((ColumnKind::Intake, 0)));
    }

    #[test]
    fn edit_item_rejected_on_locked_intake() {
        let mut board = locked_board();
        let before = board.clone();

        let result = apply(
            &mut board,
            Intent::EditItem {
                card_id: 3,
                index: 0,
                text: text("blocked"),
            },
        );

        assert_eq!(result, Err(Rejection::IntakeLocked));
        assert_eq!(board, before);
    }

    #[test]
    fn edit_item_rejected_on_done_card() {
        let mut board = board_with_columns(vec![], vec![], vec![done_card(1, 2)]);
        let before = board.clone();

        let result = apply(
            &mut board,
            Intent::EditItem {
                card_id: 1,
                index: 0,
                text: text("late"),
            },
        );

        assert_eq!(result, Err(Rejection::CardFinished(1)));
        assert_eq!(board, before);
    }

    #[test]
    fn edit_item_out_of_range_is_rejected() {
        let mut board = board_with_columns(vec![card(1, 2)], vec![], vec![]);

        let result = apply(
            &mut board,
            Intent::EditItem {
                card_id: 1,
                index: 5,
                text: text("nowhere"),
            },
        );

        assert_eq!(
            result,
            Err(Rejection::ItemNotFound {
                card_id: 1,
                index: 5
            })
        );
    }

    #[test]
    fn clearing_color_removes_it() {
        let mut board = board_with_columns(vec![card(1, 1)], vec![], vec![]);
        board.columns[0].cards[0].color = Some("#abc".to_string());
        apply(
            &mut board,
            Intent::EditColor {
                card_id: 1,
                color: None,
            },
        )
        .expect("clear");
        assert_eq!(board.card(1).expect("card").color, None);
    }
}
