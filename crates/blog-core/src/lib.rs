//! # Blog Core
//!
//! Core library for Blog - a small personal blogging engine with a
//! draft/publish workflow and full-text search.
//!
//! This crate provides the domain model, slug generation, storage engine and
//! search index, independent of any front end (CLI or web).
//!
//! ## Architecture
//!
//! - **storage**: Storage engine trait and the SQLite implementation
//! - **slug**: URL-safe identifiers derived from entry titles
//! - **fs**: Atomic file helpers used for backups

pub mod error;
pub mod fs;
pub mod slug;
pub mod storage;

pub use error::{BlogError, Result};
pub use storage::StorageEngine;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
