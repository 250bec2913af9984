use std::path::PathBuf;

use blog_core::storage::SqliteStorage;
use blog_core::StorageEngine;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_blog_path, write_config, BlogConfig};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let target = match args.path.clone().or_else(|| ctx.cli().blog.clone()) {
        Some(path) => PathBuf::from(path),
        None => default_blog_path()?,
    };

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!("Failed to create directory {}: {}", parent.display(), e)
        })?;
    }

    SqliteStorage::create(&target)?;
    let target = target.canonicalize().unwrap_or(target);

    if !args.no_config {
        let config_path = match args.config_path.as_ref() {
            Some(path) => PathBuf::from(path),
            None => resolve_config_path()?,
        };
        if config_path.exists() {
            eprintln!(
                "Warning: config {} already exists; leaving it unchanged",
                config_path.display()
            );
        } else {
            write_config(&config_path, &BlogConfig::new(target.clone()))?;
            if !ctx.quiet() {
                println!("Wrote config {}", config_path.display());
            }
        }
    }

    if !ctx.quiet() {
        println!("Initialized new blog at {}", target.display());
    }
    Ok(())
}
