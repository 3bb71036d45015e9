//! Process exit codes.

pub const SUCCESS: i32 = 0;

/// Any failure: bad arguments, unreadable input, rejected table.
pub const ERROR: i32 = 2;
