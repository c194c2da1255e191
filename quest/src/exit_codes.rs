//! Stable exit codes for quest CLI commands.

/// Command succeeded; for `quest run`, no mission was active or the active
/// mission was satisfied.
pub const OK: i32 = 0;
/// Command failed: bad input, unreadable files, network or protocol errors.
pub const INVALID: i32 = 1;
/// `quest run` completed but the active mission was not satisfied.
pub const UNSATISFIED: i32 = 2;
