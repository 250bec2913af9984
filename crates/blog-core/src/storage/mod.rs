//! Storage layer: engine trait, data model and the SQLite backend.

pub mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteStorage;
pub use traits::StorageEngine;
pub use types::{BlogMetadata, Entry, EntryFilter, IndexRecord, NewEntry};
