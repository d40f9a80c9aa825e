//! Stable exit codes for noteboard CLI commands.

/// Command succeeded or the intent was applied.
pub const OK: i32 = 0;
/// Command failed due to invalid layout/config/snapshot or other errors.
pub const INVALID: i32 = 1;
/// The intent was rejected; the board is unchanged.
pub const REJECTED: i32 = 2;
