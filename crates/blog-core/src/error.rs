//! Error types for Blog core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to exit codes and user-friendly messages.

use thiserror::Error;

/// Result type alias for Blog operations.
pub type Result<T> = std::result::Result<T, BlogError>;

/// Core error type for Blog operations.
#[derive(Debug, Error)]
pub enum BlogError {
    /// Missing or malformed entry data; nothing was written
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found (or not visible to the caller)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness constraint violated (duplicate slug)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// The search index could not be brought in line with an entry write.
    /// The surrounding operation is rolled back.
    #[error("Search index error: {0}")]
    IndexSync(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Blog database file does not exist
    #[error("Blog database not found")]
    BlogNotFound,

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error (fallback)
    #[error("{0}")]
    Other(String),
}

impl BlogError {
    /// True for errors caused by the caller's input rather than the backend.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            BlogError::Validation(_)
                | BlogError::InvalidInput(_)
                | BlogError::Constraint(_)
                | BlogError::NotFound(_)
        )
    }
}

impl From<std::io::Error> for BlogError {
    fn from(err: std::io::Error) -> Self {
        BlogError::Storage(err.to_string())
    }
}

impl From<rusqlite::Error> for BlogError {
    fn from(err: rusqlite::Error) -> Self {
        BlogError::Storage(format!("SQLite error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_classification() {
        assert!(BlogError::Validation("x".to_string()).is_user_error());
        assert!(BlogError::Constraint("x".to_string()).is_user_error());
        assert!(!BlogError::IndexSync("x".to_string()).is_user_error());
        assert!(!BlogError::Storage("x".to_string()).is_user_error());
    }

    #[test]
    fn test_sqlite_error_maps_to_storage() {
        let err: BlogError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, BlogError::Storage(_)));
    }
}
