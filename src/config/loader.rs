//! Configuration file loading and saving

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .codesize-diff.toml in the given directory
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use codesize_diff::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Using size tool: {}", config.size_tool);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(dir: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(dir, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(dir: &Path, fs: &FS) -> Result<ConfigFile> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(e).context(format!("Failed to read {}", CONFIG_FILE_NAME));
            }
        };

        Self::parse(&contents, &config_path)
    }

    /// Load an explicitly named config file; unlike [`ConfigLoader::load`], a missing file is an error
    pub fn load_file(path: &Path) -> Result<ConfigFile> {
        Self::load_file_with_fs(path, &RealFileSystem)
    }

    /// Load an explicitly named config file with a custom filesystem implementation
    pub fn load_file_with_fs<FS: FileSystem>(path: &Path, fs: &FS) -> Result<ConfigFile> {
        let contents = fs
            .read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<ConfigFile> {
        let config: ConfigFile = toml_edit::de::from_str(contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to .codesize-diff.toml in the given directory
    pub fn save(config: &ConfigFile, dir: &Path) -> Result<()> {
        Self::save_with_fs(config, dir, &RealFileSystem)
    }

    /// Save config with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(config: &ConfigFile, dir: &Path, fs: &FS) -> Result<()> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;

        fs.write(&config_path, contents)
            .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

        Ok(())
    }
}
