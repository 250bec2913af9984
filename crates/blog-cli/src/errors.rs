//! CLI error types for structured error handling.
//!
//! Typed errors map to specific exit codes so scripts can tell a missing
//! entry from a duplicate slug or a broken search index.

use std::fmt;

use blog_core::BlogError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, blog database, entry)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// Integrity check failure
    Integrity(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::InvalidInput(message) | CliError::Integrity(message) => {
                write!(f, "{}", message)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Integrity(_) => exit_codes::INTEGRITY_FAILED,
        }
    }
}

/// Exit code for an arbitrary error bubbled up to `main`.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    match err.downcast_ref::<BlogError>() {
        Some(BlogError::NotFound(_)) | Some(BlogError::BlogNotFound) => exit_codes::NOT_FOUND,
        Some(BlogError::Validation(_)) | Some(BlogError::InvalidInput(_)) => {
            exit_codes::INVALID_INPUT
        }
        Some(BlogError::Constraint(_)) => exit_codes::CONSTRAINT,
        Some(BlogError::IndexSync(_)) => exit_codes::INTEGRITY_FAILED,
        _ => exit_codes::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_exit_codes() {
        let err = anyhow::Error::new(BlogError::Constraint("slug".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::CONSTRAINT);

        let err = anyhow::Error::new(BlogError::Validation("title".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::INVALID_INPUT);

        let err = anyhow::Error::new(BlogError::NotFound("entry".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::NOT_FOUND);

        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), exit_codes::FAILURE);
    }

    #[test]
    fn test_cli_errors_keep_their_code() {
        let err = anyhow::Error::new(CliError::not_found("Entry not found", "Hint: x"));
        assert_eq!(exit_code_for(&err), exit_codes::NOT_FOUND);
        assert_eq!(
            CliError::invalid_input("bad").exit_code(),
            exit_codes::INVALID_INPUT
        );
    }
}
