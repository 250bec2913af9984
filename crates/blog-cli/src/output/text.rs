//! Text and table output formatting for entries.

use std::io::IsTerminal;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use owo_colors::OwoColorize;

use blog_core::storage::Entry;

use crate::helpers::OutputFormat;

use super::json::entries_json;

const TITLE_WIDTH: usize = 48;

/// Whether stdout should receive ANSI colors.
fn use_color() -> bool {
    std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none()
        && std::env::var("TERM").map(|v| v != "dumb").unwrap_or(true)
}

fn status_label(entry: &Entry, color: bool) -> String {
    match (entry.is_draft(), color) {
        (false, true) => "published".green().to_string(),
        (false, false) => "published".to_string(),
        (true, true) => "draft".yellow().to_string(),
        (true, false) => "draft".to_string(),
    }
}

fn format_date(entry: &Entry) -> String {
    entry.timestamp.format("%Y-%m-%d %H:%M").to_string()
}

/// Truncate a string to max characters, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", truncated)
}

/// Print a list of entries as JSON, a table or plain lines.
pub fn print_entry_list(
    entries: &[Entry],
    json: bool,
    format: Option<OutputFormat>,
    quiet: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&entries_json(entries))?);
        return Ok(());
    }

    if quiet {
        for entry in entries {
            println!("{}", entry.slug);
        }
        return Ok(());
    }

    if entries.is_empty() {
        println!("No entries found.");
        return Ok(());
    }

    let color = use_color();
    let format = format.unwrap_or(if std::io::stdout().is_terminal() {
        OutputFormat::Table
    } else {
        OutputFormat::Plain
    });

    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["Date", "Slug", "Title", "Status"]);
            for entry in entries {
                table.add_row(vec![
                    format_date(entry),
                    entry.slug.clone(),
                    truncate(&entry.title, TITLE_WIDTH),
                    status_label(entry, color),
                ]);
            }
            println!("{}", table);
        }
        OutputFormat::Plain => {
            for entry in entries {
                println!(
                    "{}\t{}\t{}\t{}",
                    entry.timestamp.to_rfc3339(),
                    entry.slug,
                    status_label(entry, false),
                    entry.title
                );
            }
        }
    }

    Ok(())
}

/// Print a single entry with its metadata header.
pub fn print_entry(entry: &Entry, quiet: bool) {
    if quiet {
        println!("{}", entry.content);
        return;
    }

    let color = use_color();
    if color {
        println!("{}", entry.title.bold());
    } else {
        println!("{}", entry.title);
    }
    println!(
        "{} | {} | {}",
        entry.slug,
        format_date(entry),
        status_label(entry, color)
    );
    println!();
    println!("{}", entry.content);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer title", 10), "a much ...");
    }
}
