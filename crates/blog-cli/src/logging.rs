//! Logging bootstrap for the CLI.
//!
//! Core emits records through the `log` facade; this module installs the
//! `flexi_logger` backend once per process. Records go to stderr unless a
//! log directory is configured, in which case size-rotated files are used.

use std::path::Path;

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};

const LOG_FILE_BASENAME: &str = "blog";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const DEFAULT_LEVEL: &str = "warn";

/// Pick the log spec: `-v` flags beat `BLOG_LOG`, which beats the config file.
pub fn resolve_level(verbose: u8, env_level: Option<&str>, config_level: Option<&str>) -> String {
    let from_flags = match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };

    from_flags
        .or(env_level.filter(|value| !value.trim().is_empty()))
        .or(config_level.filter(|value| !value.trim().is_empty()))
        .unwrap_or(DEFAULT_LEVEL)
        .to_string()
}

/// Start the logger. The returned handle must be kept alive until exit.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> anyhow::Result<LoggerHandle> {
    let logger = Logger::try_with_str(level)
        .map_err(|e| anyhow::anyhow!("Invalid log level `{}`: {}", level, e))?;

    let logger = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|e| {
                anyhow::anyhow!("Failed to create log directory {}: {}", dir.display(), e)
            })?;
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(dir)
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
        None => logger.log_to_stderr(),
    };

    let handle = logger
        .start()
        .map_err(|e| anyhow::anyhow!("Failed to start logger: {}", e))?;

    log::debug!(
        "event=cli_start version={} level={}",
        blog_core::VERSION,
        level
    );
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flags_win() {
        assert_eq!(resolve_level(2, Some("info"), Some("error")), "debug");
        assert_eq!(resolve_level(5, None, None), "trace");
    }

    #[test]
    fn test_env_beats_config() {
        assert_eq!(resolve_level(0, Some("blog_core=debug"), Some("info")), "blog_core=debug");
        assert_eq!(resolve_level(0, Some("  "), Some("info")), "info");
    }

    #[test]
    fn test_default_level() {
        assert_eq!(resolve_level(0, None, None), "warn");
    }
}
