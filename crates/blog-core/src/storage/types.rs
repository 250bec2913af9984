//! Core data types for the storage layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata for a blog database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogMetadata {
    /// Format version (e.g., "0.1")
    pub format_version: String,

    /// When this database was created
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp (informational)
    pub last_modified: DateTime<Utc>,
}

/// A single blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier, assigned on creation
    pub id: Uuid,

    pub title: String,

    /// URL-safe identifier, unique across entries
    pub slug: String,

    pub content: String,

    /// `false` means draft
    pub published: bool,

    /// Creation time, used for list ordering
    pub timestamp: DateTime<Utc>,
}

impl Entry {
    /// Drafts are hidden from public listings, lookups and search.
    pub fn is_draft(&self) -> bool {
        !self.published
    }
}

/// Builder for creating new entries.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub title: String,

    pub content: String,

    pub published: bool,

    /// Explicit slug; derived from the title when `None` or empty
    pub slug: Option<String>,

    /// Optional: creation time override (defaults to now)
    pub timestamp: Option<DateTime<Utc>>,
}

impl NewEntry {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            published: false,
            slug: None,
            timestamp: None,
        }
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// A search index record, one per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRecord {
    pub entry_id: Uuid,

    /// Title and content joined by a newline
    pub content: String,
}

/// Filter for listing entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// `Some(true)` for published only, `Some(false)` for drafts only
    pub published: Option<bool>,

    /// Start date (inclusive)
    pub since: Option<DateTime<Utc>>,

    /// End date (inclusive)
    pub until: Option<DateTime<Utc>>,

    /// Maximum number of results
    pub limit: Option<usize>,

    /// Number of results to skip
    pub offset: Option<usize>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    pub fn since(mut self, date: DateTime<Utc>) -> Self {
        self.since = Some(date);
        self
    }

    pub fn until(mut self, date: DateTime<Utc>) -> Self {
        self.until = Some(date);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_builder() {
        let now = Utc::now();
        let entry = NewEntry::new("Title", "Body")
            .published(true)
            .with_slug("custom")
            .with_timestamp(now);

        assert_eq!(entry.title, "Title");
        assert_eq!(entry.content, "Body");
        assert!(entry.published);
        assert_eq!(entry.slug.as_deref(), Some("custom"));
        assert_eq!(entry.timestamp, Some(now));
    }

    #[test]
    fn test_new_entry_defaults_to_draft() {
        let entry = NewEntry::new("Title", "Body");
        assert!(!entry.published);
        assert!(entry.slug.is_none());
        assert!(entry.timestamp.is_none());
    }

    #[test]
    fn test_entry_is_draft_until_published() {
        let mut entry = Entry {
            id: Uuid::now_v7(),
            title: "Title".to_string(),
            slug: "title".to_string(),
            content: "Body".to_string(),
            published: false,
            timestamp: Utc::now(),
        };
        assert!(entry.is_draft());

        entry.published = true;
        assert!(!entry.is_draft());
    }

    #[test]
    fn test_entry_filter_builder() {
        let now = Utc::now();

        let filter = EntryFilter::new()
            .published(false)
            .since(now)
            .limit(20)
            .offset(40);

        assert_eq!(filter.published, Some(false));
        assert_eq!(filter.since, Some(now));
        assert_eq!(filter.limit, Some(20));
        assert_eq!(filter.offset, Some(40));
    }
}
