use std::path::Path;

use blog_core::StorageEngine;

use crate::app::AppContext;
use crate::cli::BackupArgs;
use crate::errors::CliError;

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let storage = ctx.open_storage()?;
    let result = storage.check_integrity();
    storage.close()?;

    match result {
        Ok(()) => {
            if !ctx.quiet() {
                println!("Integrity check: OK");
                println!("- search index: OK");
                println!("- slugs: OK");
                println!("- metadata keys: OK");
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("Integrity check: FAILED");
            eprintln!("- error: {}", err);
            eprintln!("Hint: Run `blog reindex` to rebuild the search index.");
            Err(CliError::Integrity("Integrity check failed".to_string()).into())
        }
    }
}

pub fn handle_reindex(ctx: &AppContext) -> anyhow::Result<()> {
    let mut storage = ctx.open_storage()?;
    let count = storage.rebuild_index()?;
    storage.close()?;

    if !ctx.quiet() {
        println!("Reindexed {} entries", count);
    }
    Ok(())
}

pub fn handle_backup(ctx: &AppContext, args: &BackupArgs) -> anyhow::Result<()> {
    let storage = ctx.open_storage()?;
    storage.backup(Path::new(&args.destination))?;
    storage.close()?;

    if !ctx.quiet() {
        println!("Backed up blog to {}", args.destination);
    }
    Ok(())
}
