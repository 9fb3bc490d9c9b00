//! Exit code constants for the CLI application.

/// Success exit code (standard Unix convention).
pub const SUCCESS: i32 = 0;

/// Invalid input, configuration or request.
pub const ERROR: i32 = 2;

/// Run cancelled (time limit reached) exit code.
pub const INTERRUPTED: i32 = 130;
