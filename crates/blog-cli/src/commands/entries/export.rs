use blog_core::storage::{EntryFilter, StorageEngine};

use crate::app::AppContext;
use crate::cli::ExportArgs;
use crate::output::entries_json;

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let storage = ctx.open_storage()?;
    let entries = if args.include_drafts {
        storage.list_entries(&EntryFilter::new())?
    } else {
        storage.public_entries()?
    };
    storage.close()?;

    println!("{}", serde_json::to_string_pretty(&entries_json(&entries))?);
    Ok(())
}
