//! JSON output formatting for entries.

use blog_core::storage::Entry;

/// Convert an entry to JSON for output.
pub fn entry_json(entry: &Entry) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id,
        "title": entry.title,
        "slug": entry.slug,
        "content": entry.content,
        "published": entry.published,
        "timestamp": entry.timestamp,
    })
}

/// Convert multiple entries to a JSON array for output.
pub fn entries_json(entries: &[Entry]) -> serde_json::Value {
    serde_json::Value::Array(entries.iter().map(entry_json).collect())
}
