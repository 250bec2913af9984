use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct BlogConfig {
    pub blog: BlogSection,
    #[serde(default)]
    pub log: LogSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BlogSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct LogSection {
    /// Log level spec understood by flexi_logger (e.g. "info", "blog_core=debug")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Write rotating log files here instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl BlogConfig {
    pub fn new(blog_path: PathBuf) -> Self {
        Self {
            blog: BlogSection {
                path: blog_path.to_string_lossy().to_string(),
            },
            log: LogSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_blog_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("blog.db"))
}

pub fn read_config(path: &Path) -> anyhow::Result<BlogConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &BlogConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("blog"));
        }
    }
    Ok(home_dir()?.join(".config").join("blog"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("blog"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("blog"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = BlogConfig::new(PathBuf::from("/var/lib/blog/blog.db"));
        config.log.level = Some("debug".to_string());

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();

        assert_eq!(loaded.blog.path, "/var/lib/blog/blog.db");
        assert_eq!(loaded.log.level.as_deref(), Some("debug"));
        assert!(loaded.log.dir.is_none());
    }

    #[test]
    fn test_log_section_is_optional() {
        let config: BlogConfig = toml::from_str("[blog]\npath = \"/tmp/b.db\"\n").unwrap();
        assert_eq!(config.blog.path, "/tmp/b.db");
        assert!(config.log.level.is_none());
    }
}
