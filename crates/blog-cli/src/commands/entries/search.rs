use blog_core::storage::StorageEngine;

use crate::app::AppContext;
use crate::cli::SearchArgs;
use crate::helpers::parse_output_format;
use crate::output::print_entry_list;

pub fn handle_search(ctx: &AppContext, args: &SearchArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;

    let storage = ctx.open_storage()?;
    let mut entries = storage.search_entries(&args.query)?;
    storage.close()?;

    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }

    print_entry_list(&entries, args.json, format, ctx.quiet())
}
