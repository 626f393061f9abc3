mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub cache_dir: Option<PathBuf>,
    pub width: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the notification archive.
    pub cache_dir: PathBuf,
    /// Render width in text columns.
    pub width: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let cache_dir = file
            .cache_dir
            .map(PathBuf::from)
            .or_else(|| cli.cache_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("cache_dir must be specified via --cache-dir or in config file")
            })?;

        if !cache_dir.exists() {
            bail!("Cache directory does not exist: {:?}", cache_dir);
        }
        if !cache_dir.is_dir() {
            bail!("cache_dir is not a directory: {:?}", cache_dir);
        }

        let width = file.width.unwrap_or(cli.width);
        if width == 0 {
            bail!("width must be positive");
        }

        Ok(Self { cache_dir, width })
    }
}
