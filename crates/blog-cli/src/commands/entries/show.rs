use blog_core::storage::StorageEngine;

use crate::app::AppContext;
use crate::cli::ShowArgs;
use crate::output::{entry_json, print_entry};

use super::with_slug_hint;

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let storage = ctx.open_storage()?;
    let entry = storage
        .get_by_slug(&args.slug, args.drafts)
        .map_err(with_slug_hint)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entry_json(&entry))?);
    } else {
        print_entry(&entry, ctx.quiet());
    }
    storage.close()?;
    Ok(())
}
