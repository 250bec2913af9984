//! Entry field validation and timestamp encoding.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{BlogError, Result};

/// Validate the required text fields of an entry.
///
/// Title and content must contain something other than whitespace.
pub fn validate_entry_fields(title: &str, content: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(BlogError::Validation("Title is required".to_string()));
    }
    if content.trim().is_empty() {
        return Err(BlogError::Validation("Content is required".to_string()));
    }
    Ok(())
}

/// Validate a slug that is about to be stored. Any non-empty slug is kept.
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(BlogError::Validation("Slug must not be empty".to_string()));
    }
    Ok(())
}

/// Encode a timestamp for storage.
///
/// Fixed precision and a `Z` suffix keep text order equal to time order.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_blank_fields_are_rejected() {
        assert!(matches!(
            validate_entry_fields("", "body"),
            Err(BlogError::Validation(_))
        ));
        assert!(matches!(
            validate_entry_fields("title", "   \n"),
            Err(BlogError::Validation(_))
        ));
        assert!(validate_entry_fields("title", "body").is_ok());
    }

    #[test]
    fn test_slug_validation() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug(&"s".repeat(300)).is_ok());
        assert!(validate_slug("hello-world").is_ok());
    }

    #[test]
    fn test_timestamp_text_order_matches_time_order() {
        let earlier = Utc.with_ymd_and_hms(2024, 1, 9, 23, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(&earlier), "2024-01-09T23:59:59.000000Z");
        assert!(format_timestamp(&earlier) < format_timestamp(&later));
    }
}
