use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use blog_core::VERSION;

/// Blog - a small personal blog with drafts and full-text search
#[derive(Parser)]
#[command(name = "blog")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the blog database
    #[arg(short, long, global = true, env = "BLOG_PATH")]
    pub blog: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new blog database and config file
    Init(InitArgs),

    /// Write a new entry
    New(NewArgs),

    /// Edit an existing entry
    Edit(EditArgs),

    /// Show an entry by slug
    Show(ShowArgs),

    /// List entries (published by default)
    List(ListArgs),

    /// List drafts
    Drafts(DraftsArgs),

    /// Search published entries
    Search(SearchArgs),

    /// Export entries as JSON
    Export(ExportArgs),

    /// Check database and search index integrity
    Check,

    /// Rebuild the search index from the entries table
    Reindex,

    /// Write a snapshot of the database
    Backup(BackupArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the blog database will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Do not write a config file
    #[arg(long)]
    pub no_config: bool,

    /// Config path override
    #[arg(long)]
    pub config_path: Option<String>,
}

/// Arguments for the `new` command
#[derive(Args)]
pub struct NewArgs {
    /// Entry title
    #[arg(long)]
    pub title: String,

    /// Entry content (read from stdin when omitted)
    #[arg(long)]
    pub content: Option<String>,

    /// Explicit slug (derived from the title when omitted)
    #[arg(long)]
    pub slug: Option<String>,

    /// Publish immediately instead of saving a draft
    #[arg(long)]
    pub publish: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Slug of the entry to edit
    #[arg(value_name = "SLUG")]
    pub slug: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New content
    #[arg(long)]
    pub content: Option<String>,

    /// Publish the entry
    #[arg(long, conflicts_with = "draft")]
    pub publish: bool,

    /// Turn the entry back into a draft
    #[arg(long)]
    pub draft: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Entry slug
    #[arg(value_name = "SLUG")]
    pub slug: String,

    /// Allow showing drafts
    #[arg(long)]
    pub drafts: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Include drafts alongside published entries
    #[arg(long, conflicts_with = "drafts_only")]
    pub all: bool,

    /// Only list drafts
    #[arg(long)]
    pub drafts_only: bool,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Skip this many results
    #[arg(long)]
    pub offset: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `drafts` command
#[derive(Args)]
pub struct DraftsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `search` command
#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Limit number of results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Include drafts in the export
    #[arg(long)]
    pub include_drafts: bool,
}

/// Arguments for the `backup` command
#[derive(Args)]
pub struct BackupArgs {
    /// Destination path
    #[arg(value_name = "DEST")]
    pub destination: String,
}
