use blog_core::storage::{EntryFilter, StorageEngine};

use crate::app::AppContext;
use crate::cli::{DraftsArgs, ListArgs};
use crate::helpers::parse_output_format;
use crate::output::print_entry_list;

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;

    let mut filter = EntryFilter::new();
    if args.drafts_only {
        filter = filter.published(false);
    } else if !args.all {
        filter = filter.published(true);
    }
    if let Some(limit) = args.limit {
        filter = filter.limit(limit);
    }
    if let Some(offset) = args.offset {
        filter = filter.offset(offset);
    }

    let storage = ctx.open_storage()?;
    let entries = storage.list_entries(&filter)?;
    storage.close()?;

    print_entry_list(&entries, args.json, format, ctx.quiet())
}

pub fn handle_drafts(ctx: &AppContext, args: &DraftsArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;

    let storage = ctx.open_storage()?;
    let entries = storage.drafts()?;
    storage.close()?;

    print_entry_list(&entries, args.json, format, ctx.quiet())
}
