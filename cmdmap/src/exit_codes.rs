//! Stable exit codes for cmdmap CLI commands.

/// Command succeeded; for `console`, input reached EOF.
pub const OK: i32 = 0;
/// Invalid config, unreadable input, or any other error.
pub const INVALID: i32 = 1;
