//! Storage engine trait definition.
//!
//! The `StorageEngine` trait defines the interface a blog backend must
//! implement. Callers open one engine at process start, pass it explicitly
//! to every operation and close it at shutdown.

use std::path::Path;
use uuid::Uuid;

use super::types::{BlogMetadata, Entry, EntryFilter, IndexRecord, NewEntry};
use crate::error::Result;

/// Storage engine interface for blog entries and their search index.
///
/// All implementations must ensure:
/// - Every entry has exactly one search index record with the same id
/// - An entry write and its index update succeed or fail together
/// - Slugs are unique and non-empty
pub trait StorageEngine: Send + Sync {
    /// Create a new blog database at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::Storage` if:
    /// - File already exists
    /// - Cannot write to path
    fn create(path: &Path) -> Result<()>
    where
        Self: Sized;

    /// Open an existing blog database.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::BlogNotFound` if the file does not exist, or
    /// `BlogError::Storage` if it is not a blog database.
    fn open(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Close the database. The instance cannot be used afterwards.
    fn close(self) -> Result<()>;

    /// Get database metadata.
    fn metadata(&self) -> Result<BlogMetadata>;

    // --- Entry operations ---

    /// Create a new entry and index it.
    ///
    /// The slug is derived from the title unless one is supplied.
    ///
    /// # Errors
    ///
    /// - `BlogError::Validation` if title or content is blank, or no slug
    ///   can be derived. Nothing is written.
    /// - `BlogError::Constraint` if the slug is already taken.
    /// - `BlogError::IndexSync` if the index could not be updated; the
    ///   entry write is rolled back.
    fn create_entry(&mut self, entry: &NewEntry) -> Result<Entry>;

    /// Persist the mutable fields (title, content, slug, published) of an
    /// existing entry and re-index it, even if nothing changed.
    ///
    /// # Errors
    ///
    /// Same as [`create_entry`](Self::create_entry), plus
    /// `BlogError::NotFound` if no entry has this id.
    fn save_entry(&mut self, entry: &Entry) -> Result<Entry>;

    /// Get an entry by ID.
    ///
    /// Returns `Ok(Some(entry))` if found, `Ok(None)` if not found.
    fn get_entry(&self, id: &Uuid) -> Result<Option<Entry>>;

    /// Get an entry by slug.
    ///
    /// Drafts are only visible when `include_drafts` is true.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::NotFound` if no visible entry has this slug.
    fn get_by_slug(&self, slug: &str, include_drafts: bool) -> Result<Entry>;

    /// List entries matching the filter, newest first.
    fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<Entry>>;

    /// All published entries, newest first.
    fn public_entries(&self) -> Result<Vec<Entry>> {
        self.list_entries(&EntryFilter::new().published(true))
    }

    /// All drafts, newest first.
    fn drafts(&self) -> Result<Vec<Entry>> {
        self.list_entries(&EntryFilter::new().published(false))
    }

    /// Search published entries.
    ///
    /// The query is split on whitespace and every term must match. A query
    /// with no terms returns no entries. Results are ordered by relevance,
    /// then insertion order.
    fn search_entries(&self, query: &str) -> Result<Vec<Entry>>;

    // --- Search index operations ---

    /// Get the search index record for an entry.
    fn index_record(&self, entry_id: &Uuid) -> Result<Option<IndexRecord>>;

    /// Rewrite every index record from the entries table.
    ///
    /// Returns the number of entries indexed.
    fn rebuild_index(&mut self) -> Result<usize>;

    // --- Maintenance operations ---

    /// Check database integrity.
    ///
    /// Verifies:
    /// - Every entry has exactly one index record with current content
    /// - No orphaned index records
    /// - No empty slugs
    /// - Required metadata keys
    fn check_integrity(&self) -> Result<()>;

    /// Write a consistent snapshot of the database to `destination`.
    fn backup(&self, destination: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_definition_compiles() {
        fn _accepts_storage_engine<T: StorageEngine>(_engine: T) {}
    }
}
