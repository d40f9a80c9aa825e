//! Text rendering of the board for terminal collaborators.

use anyhow::Result;
use minijinja::{Environment, context};
use serde::Serialize;

use crate::board::{Board, Card, ColumnKind, Item};
use crate::core::progression::completion_rate;

const BOARD_TEMPLATE: &str = include_str!("templates/board.txt");

#[derive(Debug, Clone, Serialize)]
struct ColumnContext<'a> {
    title: &'a str,
    count: usize,
    capacity: Option<usize>,
    locked: bool,
    cards: Vec<CardContext<'a>>,
}

#[derive(Debug, Clone, Serialize)]
struct CardContext<'a> {
    id: u64,
    title: &'a str,
    color: Option<&'a str>,
    percent: u32,
    items: &'a [Item],
    completed_date: Option<&'a str>,
}

impl<'a> CardContext<'a> {
    fn from_card(card: &'a Card) -> Self {
        Self {
            id: card.id,
            title: &card.title,
            color: card.color.as_deref(),
            percent: (completion_rate(card) * 100.0).round() as u32,
            items: &card.items,
            completed_date: card.completed_date.as_deref(),
        }
    }
}

/// Template engine wrapper around minijinja.
pub struct BoardRenderer {
    env: Environment<'static>,
}

impl Default for BoardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template("board.txt", BOARD_TEMPLATE)
            .expect("board template should be valid");
        Self { env }
    }

    /// Render the board as plain text; `intake_locked` marks the intake column.
    pub fn render(&self, board: &Board, intake_locked: bool) -> Result<String> {
        let columns: Vec<ColumnContext<'_>> = ColumnKind::ALL
            .into_iter()
            .map(|kind| {
                let column = board.column(kind);
                ColumnContext {
                    title: &column.title,
                    count: column.cards.len(),
                    capacity: kind.capacity(),
                    locked: kind == ColumnKind::Intake && intake_locked,
                    cards: column.cards.iter().map(CardContext::from_card).collect(),
                }
            })
            .collect();
        let template = self.env.get_template("board.txt")?;
        let rendered = template.render(context! { columns => columns })?;
        Ok(rendered)
    }
}
