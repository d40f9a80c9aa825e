//! Kanban-style note board with checklist-driven card progression.
//!
//! Cards move from Intake to In-Progress to Done as their checklists fill up,
//! gated by column capacity and the intake lock. The architecture enforces a
//! strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (value types, progression, intake
//!   lock, intent application, invariants). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, snapshot files, rendering).
//!
//! [`store`] sequences core logic with persistence and change notification;
//! the `noteboard` binary is a thin CLI collaborator on top of it.

pub mod board;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
