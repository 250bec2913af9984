//! SQLite FTS5 search index over entry title and content.
//!
//! The index holds exactly one record per entry, keyed by entry id. Records
//! are upserted inside the same transaction as the entry write.

use log::debug;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::{BlogError, Result};

/// Text stored in the index for an entry: title and content joined by a newline.
pub fn index_content(title: &str, content: &str) -> String {
    format!("{}\n{}", title, content)
}

/// Insert or overwrite the index record for an entry.
///
/// Any failure is reported as `BlogError::IndexSync` so the caller can
/// abandon the surrounding transaction.
pub fn upsert_index(conn: &Connection, entry_id: &Uuid, title: &str, content: &str) -> Result<()> {
    let id = entry_id.to_string();
    let text = index_content(title, content);

    let existing: Option<i64> = conn
        .query_row(
            "SELECT rowid FROM entries_fts WHERE entry_id = ?",
            [&id],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| index_error(entry_id, e))?;

    match existing {
        Some(rowid) => {
            conn.execute(
                "UPDATE entries_fts SET content = ? WHERE rowid = ?",
                (&text, rowid),
            )
            .map_err(|e| index_error(entry_id, e))?;
            debug!("event=index_update entry_id={} rowid={}", id, rowid);
        }
        None => {
            conn.execute(
                "INSERT INTO entries_fts (entry_id, content) VALUES (?, ?)",
                (&id, &text),
            )
            .map_err(|e| index_error(entry_id, e))?;
            debug!("event=index_insert entry_id={}", id);
        }
    }

    Ok(())
}

fn index_error(entry_id: &Uuid, err: rusqlite::Error) -> BlogError {
    BlogError::IndexSync(format!("entry {}: {}", entry_id, err))
}

/// Build an FTS5 match expression from free text.
///
/// Terms are split on whitespace, quoted as phrases and implicitly ANDed.
/// Returns `None` when the query has no terms.
pub fn build_match_expression(query: &str) -> Option<String> {
    let terms = query
        .split_whitespace()
        .filter(|term| !term.is_empty())
        .map(escape_fts_term)
        .collect::<Vec<_>>();

    if terms.is_empty() {
        return None;
    }

    Some(terms.join(" "))
}

fn escape_fts_term(raw: &str) -> String {
    let escaped = raw.replace('"', "\"\"");
    format!("\"{}\"", escaped)
}

/// Map a search failure, separating bad query syntax from backend faults.
pub fn map_query_error(err: rusqlite::Error, match_expr: &str) -> BlogError {
    if is_match_syntax_error(&err) {
        return BlogError::InvalidInput(format!(
            "invalid search query `{}`: {}",
            match_expr, err
        ));
    }
    err.into()
}

fn is_match_syntax_error(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => {
            let msg = message.to_lowercase();
            (msg.contains("fts5") && msg.contains("syntax"))
                || msg.contains("malformed match expression")
                || msg.contains("unterminated")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fts_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE VIRTUAL TABLE entries_fts USING fts5(entry_id UNINDEXED, content, tokenize = 'porter');",
        )
        .unwrap();
        conn
    }

    fn record_count(conn: &Connection, id: &Uuid) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM entries_fts WHERE entry_id = ?",
            [id.to_string()],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_index_content_joins_with_newline() {
        assert_eq!(index_content("Title", "Body"), "Title\nBody");
    }

    #[test]
    fn test_upsert_overwrites_instead_of_appending() {
        let conn = fts_conn();
        let id = Uuid::now_v7();

        upsert_index(&conn, &id, "Title", "old words").unwrap();
        upsert_index(&conn, &id, "Title", "new words").unwrap();

        assert_eq!(record_count(&conn, &id), 1);
        let content: String = conn
            .query_row(
                "SELECT content FROM entries_fts WHERE entry_id = ?",
                [id.to_string()],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(content, "Title\nnew words");
    }

    #[test]
    fn test_upsert_without_table_is_index_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err = upsert_index(&conn, &Uuid::now_v7(), "t", "c").unwrap_err();
        assert!(matches!(err, BlogError::IndexSync(_)));
    }

    #[test]
    fn test_match_expression_quotes_terms() {
        assert_eq!(
            build_match_expression("hello  world").as_deref(),
            Some("\"hello\" \"world\"")
        );
        assert_eq!(
            build_match_expression("say \"hi\"").as_deref(),
            Some("\"say\" \"\"\"hi\"\"\"")
        );
    }

    #[test]
    fn test_blank_query_has_no_expression() {
        assert_eq!(build_match_expression(""), None);
        assert_eq!(build_match_expression("   \t\n"), None);
    }
}
