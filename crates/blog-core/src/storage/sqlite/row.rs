//! Entry row type for database queries.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use uuid::Uuid;

use crate::error::{BlogError, Result};
use crate::storage::types::Entry;

/// Column list matching [`EntryRow::from_row`]; entries are aliased as `e`.
pub const ENTRY_COLUMNS: &str = "e.id, e.title, e.slug, e.content, e.published, e.timestamp";

/// Raw row data from the entries table, before parsing into domain types.
#[derive(Debug)]
pub struct EntryRow {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub published: bool,
    pub timestamp: String,
}

impl EntryRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            slug: row.get(2)?,
            content: row.get(3)?,
            published: row.get(4)?,
            timestamp: row.get(5)?,
        })
    }
}

impl TryFrom<EntryRow> for Entry {
    type Error = BlogError;

    fn try_from(row: EntryRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| BlogError::Storage(format!("Invalid entry UUID: {}", e)))?;
        let timestamp = parse_timestamp(&row.timestamp)?;

        Ok(Entry {
            id,
            title: row.title,
            slug: row.slug,
            content: row.content,
            published: row.published,
            timestamp,
        })
    }
}

/// Parse a stored RFC 3339 timestamp.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| BlogError::Storage(format!("Invalid timestamp: {}", e)))?
        .with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> EntryRow {
        EntryRow {
            id: Uuid::now_v7().to_string(),
            title: "Title".to_string(),
            slug: "title".to_string(),
            content: "Body".to_string(),
            published: true,
            timestamp: "2024-05-01T12:00:00.000000Z".to_string(),
        }
    }

    #[test]
    fn test_row_converts_to_entry() {
        let entry: Entry = sample_row().try_into().unwrap();
        assert_eq!(entry.slug, "title");
        assert!(entry.published);
        assert_eq!(entry.timestamp.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn test_row_with_bad_uuid_is_storage_error() {
        let mut row = sample_row();
        row.id = "not-a-uuid".to_string();
        let result: Result<Entry> = row.try_into();
        assert!(matches!(result, Err(BlogError::Storage(_))));
    }
}
