use blog_core::storage::{NewEntry, StorageEngine};

use crate::app::AppContext;
use crate::cli::NewArgs;
use crate::helpers::read_entry_content;

pub fn handle_new(ctx: &AppContext, args: &NewArgs) -> anyhow::Result<()> {
    let content = read_entry_content(args.content.clone())?;

    let mut new_entry = NewEntry::new(&args.title, content).published(args.publish);
    if let Some(ref slug) = args.slug {
        new_entry = new_entry.with_slug(slug);
    }

    let mut storage = ctx.open_storage()?;
    let entry = storage.create_entry(&new_entry)?;
    storage.close()?;

    if ctx.quiet() {
        println!("{}", entry.slug);
    } else if entry.published {
        println!("Published entry {}", entry.slug);
    } else {
        println!("Saved draft {}", entry.slug);
    }
    Ok(())
}
