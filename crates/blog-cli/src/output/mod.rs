//! Output formatting helpers for the CLI.
//!
//! Entries are printed as JSON, a table or plain tab-separated lines.

mod json;
mod text;

pub use json::{entries_json, entry_json};
pub use text::{print_entry, print_entry_list};
