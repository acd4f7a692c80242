//! Stable exit codes for `davinci` commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed: bad config, unreadable files, or any other error.
pub const FAILED: i32 = 1;
/// The save file exists but could not be parsed. It is left untouched.
pub const CORRUPT_SAVE: i32 = 2;
