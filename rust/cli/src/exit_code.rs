//! Exit codes returned by [`crate::run`].

pub const SUCCESS: i32 = 0;

/// Parse failures, invalid input, configuration and engine errors.
pub const ERROR: i32 = 2;

/// A simulation stopped before playing every requested hand.
pub const INTERRUPTED: i32 = 130;
