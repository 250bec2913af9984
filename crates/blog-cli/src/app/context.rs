//! Application context for the Blog CLI.
//!
//! Bundles the parsed CLI arguments with the lazily-loaded config file.

use once_cell::unsync::OnceCell;

use blog_core::storage::SqliteStorage;
use blog_core::{BlogError, StorageEngine};

use crate::cli::Cli;
use crate::config::{read_config, BlogConfig};

use super::resolver::{missing_blog_error, resolve_blog_path, resolve_config_path};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<BlogConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, if one exists. Loaded once.
    pub fn config(&self) -> anyhow::Result<Option<&BlogConfig>> {
        let config = self.config.get_or_try_init(|| -> anyhow::Result<_> {
            let path = resolve_config_path()?;
            if !path.exists() {
                return Ok(None);
            }
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    /// Open the blog database named by `--blog`, `BLOG_PATH` or the config.
    pub fn open_storage(&self) -> anyhow::Result<SqliteStorage> {
        let path = resolve_blog_path(self.cli)?;
        match SqliteStorage::open(&path) {
            Ok(storage) => Ok(storage),
            Err(BlogError::BlogNotFound) => Err(missing_blog_error(&path).into()),
            Err(err) => Err(err.into()),
        }
    }
}
