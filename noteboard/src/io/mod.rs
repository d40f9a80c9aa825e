//! I/O helpers for board commands: config, snapshots, layout and rendering.

pub mod config;
pub mod init;
pub mod render;
pub mod snapshot;
