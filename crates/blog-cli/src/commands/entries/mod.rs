//! Entry commands: writing, reading, listing and searching.

mod edit;
mod export;
mod list;
mod new;
mod search;
mod show;

pub use edit::handle_edit;
pub use export::handle_export;
pub use list::{handle_drafts, handle_list};
pub use new::handle_new;
pub use search::handle_search;
pub use show::handle_show;

use blog_core::BlogError;

use crate::errors::CliError;

/// Attach a lookup hint to a missing-slug error.
fn with_slug_hint(err: BlogError) -> anyhow::Error {
    match err {
        BlogError::NotFound(message) => CliError::not_found(
            format!("Entry not found: {}", message),
            "Hint: Run `blog list --all` to see every slug (drafts need --drafts to show).",
        )
        .into(),
        other => other.into(),
    }
}
