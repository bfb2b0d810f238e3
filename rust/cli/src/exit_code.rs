//! Process exit codes returned by [`crate::run`].

/// Command completed, including a session the player quit early.
pub const SUCCESS: i32 = 0;

/// Any failed command or rejected argument.
pub const ERROR: i32 = 2;
