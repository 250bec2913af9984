//! SQLite storage backend.
//!
//! Entries live in a regular table; the search index is an FTS5 virtual
//! table holding one record per entry. Every entry write and its index
//! upsert run in a single transaction behind the connection mutex, so
//! concurrent saves through one handle are serialized and an index
//! failure rolls the entry write back.

pub mod index;
mod row;
mod validation;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use log::{debug, info, warn};
use rusqlite::{Connection, DatabaseName, ErrorCode, OpenFlags, OptionalExtension, ToSql};
use uuid::Uuid;

use crate::error::{BlogError, Result};
use crate::slug::resolve_slug;
use crate::storage::traits::StorageEngine;
use crate::storage::types::{BlogMetadata, Entry, EntryFilter, IndexRecord, NewEntry};

use index::{build_match_expression, map_query_error, upsert_index};
use row::{parse_timestamp, EntryRow, ENTRY_COLUMNS};
use validation::{format_timestamp, validate_entry_fields, validate_slug};

/// Current on-disk format version.
pub const FORMAT_VERSION: &str = "0.1";

const SCHEMA: &str = r#"
    CREATE TABLE meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE entries (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        content TEXT NOT NULL,
        published INTEGER NOT NULL DEFAULT 0,
        timestamp TEXT NOT NULL
    );

    CREATE INDEX entries_published_timestamp
    ON entries (published, timestamp);

    CREATE VIRTUAL TABLE entries_fts USING fts5(
        entry_id UNINDEXED,
        content,
        tokenize = 'porter'
    );
"#;

/// SQLite-backed blog storage.
pub struct SqliteStorage {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open a fresh, schema-initialized database held in memory.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        Self::initialize(&mut conn)?;
        Ok(Self {
            path: None,
            conn: Mutex::new(conn),
        })
    }

    /// Path of the backing file, `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| BlogError::Storage("SQLite connection poisoned".to_string()))
    }

    fn initialize(conn: &mut Connection) -> Result<()> {
        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA)?;

        let created_at = format_timestamp(&Utc::now());
        for (key, value) in [
            ("format_version", FORMAT_VERSION),
            ("created_at", created_at.as_str()),
            ("last_modified", created_at.as_str()),
        ] {
            tx.execute("INSERT INTO meta (key, value) VALUES (?, ?)", [key, value])?;
        }

        tx.commit()?;
        Ok(())
    }

    fn verify_format(conn: &Connection) -> Result<()> {
        let version: Option<String> = conn
            .query_row(
                "SELECT value FROM meta WHERE key = 'format_version'",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| BlogError::Storage(format!("Not a blog database: {}", e)))?;

        match version.as_deref() {
            Some(FORMAT_VERSION) => Ok(()),
            Some(other) => Err(BlogError::Storage(format!(
                "Unsupported format version {} (expected {})",
                other, FORMAT_VERSION
            ))),
            None => Err(BlogError::Storage(
                "Not a blog database: format version missing".to_string(),
            )),
        }
    }

    fn touch_last_modified(conn: &Connection) -> Result<()> {
        conn.execute(
            "UPDATE meta SET value = ? WHERE key = 'last_modified'",
            [format_timestamp(&Utc::now())],
        )?;
        Ok(())
    }

    fn fetch_entry(conn: &Connection, id: &Uuid) -> Result<Option<Entry>> {
        let row = conn
            .query_row(
                &format!("SELECT {} FROM entries e WHERE e.id = ?", ENTRY_COLUMNS),
                [id.to_string()],
                EntryRow::from_row,
            )
            .optional()?;
        row.map(Entry::try_from).transpose()
    }

    fn collect_entries(rows: impl Iterator<Item = rusqlite::Result<EntryRow>>) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.try_into()?);
        }
        Ok(entries)
    }

    /// Turn a unique-constraint failure on the slug into a constraint error.
    fn slug_write_error(err: rusqlite::Error, slug: &str) -> BlogError {
        if let rusqlite::Error::SqliteFailure(code, Some(message)) = &err {
            if code.code == ErrorCode::ConstraintViolation && message.contains("entries.slug") {
                return BlogError::Constraint(format!("Slug {:?} is already in use", slug));
            }
        }
        err.into()
    }
}

impl StorageEngine for SqliteStorage {
    fn create(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(BlogError::Storage(
                "Blog database already exists".to_string(),
            ));
        }

        let mut conn = Connection::open(path)?;
        Self::initialize(&mut conn)?;
        conn.close().map_err(|(_, e)| BlogError::from(e))?;

        info!("event=blog_create path={}", path.display());
        Ok(())
    }

    fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BlogError::BlogNotFound);
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::verify_format(&conn)?;

        debug!("event=blog_open path={}", path.display());
        Ok(Self {
            path: Some(path.to_path_buf()),
            conn: Mutex::new(conn),
        })
    }

    fn close(self) -> Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| BlogError::Storage("SQLite connection poisoned".to_string()))?;
        conn.close().map_err(|(_, e)| BlogError::from(e))?;
        Ok(())
    }

    fn metadata(&self) -> Result<BlogMetadata> {
        let conn = self.lock_conn()?;

        let read = |key: &str| -> Result<String> {
            conn.query_row("SELECT value FROM meta WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?
            .ok_or_else(|| BlogError::Storage(format!("Metadata key {} missing", key)))
        };

        Ok(BlogMetadata {
            format_version: read("format_version")?,
            created_at: parse_timestamp(&read("created_at")?)?,
            last_modified: parse_timestamp(&read("last_modified")?)?,
        })
    }

    fn create_entry(&mut self, entry: &NewEntry) -> Result<Entry> {
        validate_entry_fields(&entry.title, &entry.content)?;
        let slug = resolve_slug(entry.slug.as_deref(), &entry.title)?;
        validate_slug(&slug)?;

        let id = Uuid::now_v7();
        let timestamp_str = format_timestamp(&entry.timestamp.unwrap_or_else(Utc::now));
        let timestamp = parse_timestamp(&timestamp_str)?;

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            r#"
            INSERT INTO entries (id, title, slug, content, published, timestamp)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            (
                id.to_string(),
                &entry.title,
                &slug,
                &entry.content,
                entry.published,
                &timestamp_str,
            ),
        )
        .map_err(|e| Self::slug_write_error(e, &slug))?;

        if let Err(err) = upsert_index(&tx, &id, &entry.title, &entry.content) {
            warn!("event=index_sync_failed op=create entry_id={} error={}", id, err);
            return Err(err);
        }

        Self::touch_last_modified(&tx)?;
        tx.commit()?;

        info!(
            "event=entry_create entry_id={} slug={} published={}",
            id, slug, entry.published
        );
        Ok(Entry {
            id,
            title: entry.title.clone(),
            slug,
            content: entry.content.clone(),
            published: entry.published,
            timestamp,
        })
    }

    fn save_entry(&mut self, entry: &Entry) -> Result<Entry> {
        validate_entry_fields(&entry.title, &entry.content)?;
        validate_slug(&entry.slug)?;

        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        let updated = tx
            .execute(
                "UPDATE entries SET title = ?, slug = ?, content = ?, published = ? WHERE id = ?",
                (
                    &entry.title,
                    &entry.slug,
                    &entry.content,
                    entry.published,
                    entry.id.to_string(),
                ),
            )
            .map_err(|e| Self::slug_write_error(e, &entry.slug))?;
        if updated == 0 {
            return Err(BlogError::NotFound(format!("Entry {}", entry.id)));
        }

        if let Err(err) = upsert_index(&tx, &entry.id, &entry.title, &entry.content) {
            warn!(
                "event=index_sync_failed op=save entry_id={} error={}",
                entry.id, err
            );
            return Err(err);
        }

        Self::touch_last_modified(&tx)?;
        let saved = Self::fetch_entry(&tx, &entry.id)?
            .ok_or_else(|| BlogError::NotFound(format!("Entry {}", entry.id)))?;
        tx.commit()?;

        info!(
            "event=entry_save entry_id={} slug={} published={}",
            saved.id, saved.slug, saved.published
        );
        Ok(saved)
    }

    fn get_entry(&self, id: &Uuid) -> Result<Option<Entry>> {
        let conn = self.lock_conn()?;
        Self::fetch_entry(&conn, id)
    }

    fn get_by_slug(&self, slug: &str, include_drafts: bool) -> Result<Entry> {
        let conn = self.lock_conn()?;

        let mut query = format!("SELECT {} FROM entries e WHERE e.slug = ?", ENTRY_COLUMNS);
        if !include_drafts {
            query.push_str(" AND e.published = 1");
        }

        let row = conn
            .query_row(&query, [slug], EntryRow::from_row)
            .optional()?
            .ok_or_else(|| BlogError::NotFound(format!("Entry with slug {:?}", slug)))?;
        row.try_into()
    }

    fn list_entries(&self, filter: &EntryFilter) -> Result<Vec<Entry>> {
        let conn = self.lock_conn()?;

        let mut conditions: Vec<&str> = Vec::new();
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(published) = filter.published {
            conditions.push("e.published = ?");
            params.push(Box::new(published));
        }

        if let Some(since) = filter.since {
            conditions.push("e.timestamp >= ?");
            params.push(Box::new(format_timestamp(&since)));
        }

        if let Some(until) = filter.until {
            conditions.push("e.timestamp <= ?");
            params.push(Box::new(format_timestamp(&until)));
        }

        let mut query = format!("SELECT {} FROM entries e", ENTRY_COLUMNS);
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY e.timestamp DESC, e.rowid DESC");

        if filter.limit.is_some() || filter.offset.is_some() {
            // SQLite treats a negative LIMIT as unbounded.
            let limit = filter.limit.map(|value| value as i64).unwrap_or(-1);
            query.push_str(" LIMIT ? OFFSET ?");
            params.push(Box::new(limit));
            params.push(Box::new(filter.offset.unwrap_or(0) as i64));
        }

        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(params.iter()),
            EntryRow::from_row,
        )?;
        Self::collect_entries(rows)
    }

    fn search_entries(&self, query: &str) -> Result<Vec<Entry>> {
        let Some(match_expr) = build_match_expression(query) else {
            return Ok(Vec::new());
        };

        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {}
            FROM entries_fts
            JOIN entries e ON e.id = entries_fts.entry_id
            WHERE entries_fts MATCH ? AND e.published = 1
            ORDER BY bm25(entries_fts), e.rowid ASC
            "#,
            ENTRY_COLUMNS
        ))?;

        let rows = stmt
            .query_map([&match_expr], EntryRow::from_row)
            .map_err(|e| map_query_error(e, &match_expr))?;

        let mut entries = Vec::new();
        for row in rows {
            let row = row.map_err(|e| map_query_error(e, &match_expr))?;
            entries.push(row.try_into()?);
        }

        debug!(
            "event=search terms={:?} hits={}",
            match_expr,
            entries.len()
        );
        Ok(entries)
    }

    fn index_record(&self, entry_id: &Uuid) -> Result<Option<IndexRecord>> {
        let conn = self.lock_conn()?;
        let content: Option<String> = conn
            .query_row(
                "SELECT content FROM entries_fts WHERE entry_id = ?",
                [entry_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(content.map(|content| IndexRecord {
            entry_id: *entry_id,
            content,
        }))
    }

    fn rebuild_index(&mut self) -> Result<usize> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM entries_fts", [])
            .map_err(|e| BlogError::IndexSync(format!("clear failed: {}", e)))?;

        let entries = {
            let mut stmt = tx.prepare(&format!(
                "SELECT {} FROM entries e ORDER BY e.rowid",
                ENTRY_COLUMNS
            ))?;
            let rows = stmt.query_map([], EntryRow::from_row)?;
            Self::collect_entries(rows)?
        };

        for entry in &entries {
            upsert_index(&tx, &entry.id, &entry.title, &entry.content)?;
        }

        Self::touch_last_modified(&tx)?;
        tx.commit()?;

        info!("event=index_rebuild entries={}", entries.len());
        Ok(entries.len())
    }

    fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        let count = |sql: &str| -> Result<i64> { Ok(conn.query_row(sql, [], |row| row.get(0))?) };

        if count(
            "SELECT COUNT(*) FROM entries e LEFT JOIN entries_fts f ON e.id = f.entry_id WHERE f.entry_id IS NULL",
        )? > 0
        {
            return Err(BlogError::IndexSync(
                "Search index missing entries".to_string(),
            ));
        }

        if count(
            "SELECT COUNT(*) FROM entries_fts f LEFT JOIN entries e ON f.entry_id = e.id WHERE e.id IS NULL",
        )? > 0
        {
            return Err(BlogError::IndexSync(
                "Search index has orphaned rows".to_string(),
            ));
        }

        if count(
            "SELECT COUNT(*) FROM (SELECT entry_id FROM entries_fts GROUP BY entry_id HAVING COUNT(*) > 1)",
        )? > 0
        {
            return Err(BlogError::IndexSync(
                "Search index has duplicate rows".to_string(),
            ));
        }

        if count(
            "SELECT COUNT(*) FROM entries e JOIN entries_fts f ON f.entry_id = e.id WHERE f.content != e.title || char(10) || e.content",
        )? > 0
        {
            return Err(BlogError::IndexSync(
                "Search index content is stale".to_string(),
            ));
        }

        if count("SELECT COUNT(*) FROM entries WHERE slug = ''")? > 0 {
            return Err(BlogError::Storage("Entries with empty slug".to_string()));
        }

        if count(
            "SELECT COUNT(*) FROM meta WHERE key IN ('format_version', 'created_at', 'last_modified')",
        )? < 3
        {
            return Err(BlogError::Storage(
                "Metadata table missing required keys".to_string(),
            ));
        }

        Ok(())
    }

    fn backup(&self, destination: &Path) -> Result<()> {
        if self.path.as_deref() == Some(destination) {
            return Err(BlogError::InvalidInput(
                "Backup destination is the live database".to_string(),
            ));
        }

        let conn = self.lock_conn()?;
        let data = conn.serialize(DatabaseName::Main)?;
        crate::fs::write_atomic(destination, &data)
            .map_err(|e| BlogError::Storage(format!("Backup write failed: {}", e)))?;

        info!("event=backup destination={}", destination.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_count(storage: &SqliteStorage) -> i64 {
        let conn = storage.lock_conn().unwrap();
        conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_in_memory_storage_is_initialized() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let metadata = storage.metadata().unwrap();
        assert_eq!(metadata.format_version, FORMAT_VERSION);
        assert!(storage.path().is_none());
        storage.check_integrity().unwrap();
    }

    #[test]
    fn test_index_failure_rolls_back_entry_write() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        storage
            .lock_conn()
            .unwrap()
            .execute_batch("DROP TABLE entries_fts;")
            .unwrap();

        let err = storage
            .create_entry(&NewEntry::new("Title", "Body"))
            .unwrap_err();

        assert!(matches!(err, BlogError::IndexSync(_)));
        assert_eq!(entry_count(&storage), 0);
    }

    #[test]
    fn test_index_failure_on_save_keeps_previous_state() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        let mut entry = storage
            .create_entry(&NewEntry::new("Title", "original"))
            .unwrap();
        storage
            .lock_conn()
            .unwrap()
            .execute_batch("DROP TABLE entries_fts;")
            .unwrap();

        entry.content = "changed".to_string();
        let err = storage.save_entry(&entry).unwrap_err();

        assert!(matches!(err, BlogError::IndexSync(_)));
        let stored = storage.get_entry(&entry.id).unwrap().unwrap();
        assert_eq!(stored.content, "original");
    }

    #[test]
    fn test_check_integrity_detects_stale_index() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        let entry = storage
            .create_entry(&NewEntry::new("Title", "Body"))
            .unwrap();
        storage
            .lock_conn()
            .unwrap()
            .execute(
                "UPDATE entries SET content = 'edited behind the index' WHERE id = ?",
                [entry.id.to_string()],
            )
            .unwrap();

        let err = storage.check_integrity().unwrap_err();
        assert!(matches!(err, BlogError::IndexSync(_)));

        assert_eq!(storage.rebuild_index().unwrap(), 1);
        storage.check_integrity().unwrap();
    }

    #[test]
    fn test_check_integrity_detects_missing_index_row() {
        let mut storage = SqliteStorage::open_in_memory().unwrap();
        storage
            .create_entry(&NewEntry::new("Title", "Body"))
            .unwrap();
        storage
            .lock_conn()
            .unwrap()
            .execute_batch("DELETE FROM entries_fts;")
            .unwrap();

        assert!(storage.check_integrity().is_err());
    }
}
