//! Path resolution for config and blog database files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, read_config};
use crate::errors::CliError;

/// Resolve the config file path, checking BLOG_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("BLOG_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the blog database path from CLI args or config.
pub fn resolve_blog_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.blog.as_ref() {
        return Ok(PathBuf::from(path));
    }

    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        return Err(CliError::not_found(missing_config_message(&config_path), INIT_HINT).into());
    }

    let config = read_config(&config_path)?;
    Ok(PathBuf::from(config.blog.path))
}

const INIT_HINT: &str =
    "Hint: Run `blog init`, or point at a database with BLOG_PATH=/path/to/blog.db";

/// Error for a blog database that does not exist.
pub fn missing_blog_error(path: &Path) -> CliError {
    CliError::not_found(format!("No blog found at {}", path.display()), INIT_HINT)
}

/// Error message when config file is missing.
pub fn missing_config_message(config_path: &Path) -> String {
    format!("No blog config found at {}", config_path.display())
}
