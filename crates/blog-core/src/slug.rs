//! Slug generation for entry titles.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{BlogError, Result};

static NON_WORD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid slug regex"));

/// Derive a URL-safe slug from a title.
///
/// The title is lowercased and every maximal run of non-word characters is
/// collapsed to a single `-`. Hyphens left at either end are trimmed, so
/// `"Hello World!"` becomes `"hello-world"`.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_WORD_RUN
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Pick the slug for a new entry: an explicit, non-empty slug wins verbatim,
/// otherwise one is derived from the title.
///
/// # Errors
///
/// Returns `BlogError::Validation` if the derived slug is empty.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String> {
    if let Some(value) = explicit.filter(|value| !value.is_empty()) {
        return Ok(value.to_string());
    }

    let derived = slugify(title);
    if derived.is_empty() {
        return Err(BlogError::Validation(format!(
            "Cannot derive a slug from title {:?}",
            title
        )));
    }
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_runs() {
        assert_eq!(slugify("Hello World!"), "hello-world");
        assert_eq!(slugify("Rust  --  and   SQLite"), "rust-and-sqlite");
        assert_eq!(slugify("  leading and trailing  "), "leading-and-trailing");
    }

    #[test]
    fn test_slugify_keeps_word_characters() {
        assert_eq!(slugify("snake_case 2024"), "snake_case-2024");
        assert_eq!(slugify("Café Crème"), "café-crème");
    }

    #[test]
    fn test_resolve_slug_prefers_explicit() {
        assert_eq!(
            resolve_slug(Some("My Custom Slug"), "Title").unwrap(),
            "My Custom Slug"
        );
        assert_eq!(resolve_slug(Some(""), "Some Title").unwrap(), "some-title");
        assert_eq!(resolve_slug(None, "Some Title").unwrap(), "some-title");
    }

    #[test]
    fn test_resolve_slug_rejects_empty_derivation() {
        let err = resolve_slug(None, "!!! ???").unwrap_err();
        assert!(matches!(err, BlogError::Validation(_)));
    }
}
