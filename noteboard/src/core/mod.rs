//! Deterministic, pure logic shared by the board store.
//!
//! Core modules must be free of I/O side effects (the clock is injected). They
//! operate on in-memory boards and return deterministic outputs suitable for
//! tests.

pub mod clock;
pub mod invariants;
pub mod lock;
pub mod progression;
pub mod state_update;
pub mod text;
pub mod types;
