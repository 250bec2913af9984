//! Blog CLI - a small personal blog with drafts and full-text search
//!
//! This is the command-line front end for Blog. Each invocation opens the
//! database once, runs one core operation and closes it again.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;

use std::path::Path;

use clap::Parser;
use flexi_logger::LoggerHandle;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{entries, init, maintenance, misc};
use crate::errors::exit_code_for;
use crate::logging::{init_logging, resolve_level};

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);
    let logger = start_logging(&ctx);

    let code = match run(&ctx, &cli) {
        Ok(()) => 0,
        Err(e) => {
            log::debug!("event=command_failed error={:?}", e);
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    };

    if let Some(handle) = logger.as_ref() {
        handle.flush();
    }
    if code != 0 {
        std::process::exit(code);
    }
}

fn start_logging(ctx: &AppContext) -> Option<LoggerHandle> {
    let (config_level, log_dir) = match ctx.config() {
        Ok(Some(config)) => (config.log.level.clone(), config.log.dir.clone()),
        _ => (None, None),
    };
    let env_level = std::env::var("BLOG_LOG").ok();
    let level = resolve_level(
        ctx.cli().verbose,
        env_level.as_deref(),
        config_level.as_deref(),
    );

    match init_logging(&level, log_dir.as_deref().map(Path::new)) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Warning: {}", err);
            None
        }
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => init::handle_init(ctx, args),
        Some(Commands::New(args)) => entries::handle_new(ctx, args),
        Some(Commands::Edit(args)) => entries::handle_edit(ctx, args),
        Some(Commands::Show(args)) => entries::handle_show(ctx, args),
        Some(Commands::List(args)) => entries::handle_list(ctx, args),
        Some(Commands::Drafts(args)) => entries::handle_drafts(ctx, args),
        Some(Commands::Search(args)) => entries::handle_search(ctx, args),
        Some(Commands::Export(args)) => entries::handle_export(ctx, args),
        Some(Commands::Check) => maintenance::handle_check(ctx),
        Some(Commands::Reindex) => maintenance::handle_reindex(ctx),
        Some(Commands::Backup(args)) => maintenance::handle_backup(ctx, args),
        Some(Commands::Completions { shell }) => {
            misc::handle_completions(*shell);
            Ok(())
        }
        None => {
            println!("blog {}", blog_core::VERSION);
            println!("Run `blog --help` for usage.");
            Ok(())
        }
    }
}
