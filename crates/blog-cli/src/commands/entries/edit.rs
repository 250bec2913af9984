use blog_core::storage::StorageEngine;

use crate::app::AppContext;
use crate::cli::EditArgs;

use super::with_slug_hint;

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let mut storage = ctx.open_storage()?;
    let mut entry = storage
        .get_by_slug(&args.slug, true)
        .map_err(with_slug_hint)?;

    if let Some(ref title) = args.title {
        entry.title = title.clone();
    }
    if let Some(ref content) = args.content {
        entry.content = content.clone();
    }
    if args.publish {
        entry.published = true;
    } else if args.draft {
        entry.published = false;
    }

    let saved = storage.save_entry(&entry)?;
    storage.close()?;

    if !ctx.quiet() {
        let state = if saved.published { "published" } else { "draft" };
        println!("Saved entry {} ({})", saved.slug, state);
    }
    Ok(())
}
