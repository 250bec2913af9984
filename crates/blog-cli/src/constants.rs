//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const FAILURE: i32 = 1;

    /// Resource not found (config, blog database, entry).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments (including entry validation).
    pub const INVALID_INPUT: i32 = 4;

    /// Uniqueness constraint violated (duplicate slug).
    pub const CONSTRAINT: i32 = 5;

    /// Integrity check failed or the search index is out of sync.
    pub const INTEGRITY_FAILED: i32 = 6;
}
