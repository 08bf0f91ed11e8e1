//! Collection workflow shared by `compare` and `scan`
//!
//! Resolves settings from the config file and command line, verifies that the
//! external tools exist, and runs the collector on a sized rayon pool.
//!
//! # Examples
//!
//! ```no_run
//! use codesize_diff::cmd::workflow::{ScanWorkflow, ToolOptions};
//! use std::path::Path;
//!
//! let options = ToolOptions {
//!     size_tool: Some("llvm-size".to_string()),
//!     ..ToolOptions::default()
//! };
//! let workflow = ScanWorkflow::prepare(&options, Path::new("."))?;
//! let (before, after) = workflow.collect_pair(Path::new("build-a"), Path::new("build-b"))?;
//! println!("{} vs {} binaries", before.len(), after.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cmd::args::normalize_tool_args;
use crate::collector::{CollectorConfig, Dataset, DatasetCollector};
use crate::config::{ConfigFile, ConfigLoader, ConfigResolver, Overrides, ResolvedSettings, CONFIG_FILE_NAME};
use crate::error::CodeSizeError;
use crate::tools::{ToolChain, ToolError};

/// Tool-related command-line options common to every collecting command
#[derive(Debug, Clone, Default)]
pub struct ToolOptions {
    /// Size tool given positionally
    pub size_tool: Option<String>,
    /// Raw size tool arguments, before dash normalization
    pub size_args: Vec<String>,
    /// `--file-tool`
    pub file_tool: Option<String>,
    /// `--top`
    pub top: Option<usize>,
    /// `--timeout`
    pub timeout: Option<u64>,
    /// `--jobs`
    pub jobs: Option<usize>,
    /// `--config`
    pub config: Option<PathBuf>,
}

impl ToolOptions {
    fn overrides(&self) -> Overrides {
        Overrides {
            size_tool: self.size_tool.clone(),
            size_args: normalize_tool_args(&self.size_args),
            file_tool: self.file_tool.clone(),
            top_n: self.top,
            timeout_secs: self.timeout,
            jobs: self.jobs,
        }
    }
}

/// Load the config file and apply command-line overrides
///
/// An explicit `--config` must exist; otherwise `.codesize-diff.toml` in
/// `working_dir` is optional.
pub fn resolve_settings(options: &ToolOptions, working_dir: &Path) -> Result<ResolvedSettings> {
    let (config, source) = match &options.config {
        Some(path) => (load_config(|| ConfigLoader::load_file(path), path)?, path.clone()),
        None => {
            let path = working_dir.join(CONFIG_FILE_NAME);
            (load_config(|| ConfigLoader::load(working_dir), &path)?, path)
        }
    };

    ConfigResolver::resolve(&config, &options.overrides()).map_err(|e| {
        CodeSizeError::ConfigInvalid {
            path: source,
            reason: format!("{:#}", e),
        }
        .into()
    })
}

fn load_config(load: impl FnOnce() -> Result<ConfigFile>, path: &Path) -> Result<ConfigFile> {
    load().map_err(|e| {
        CodeSizeError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: format!("{:#}", e),
        }
        .into()
    })
}

/// Verify that both external tools can be found
pub fn preflight(config: &CollectorConfig) -> Result<()> {
    ToolChain::from_config(config)
        .check_required()
        .map_err(|e| match e {
            ToolError::MissingTool(tool) => CodeSizeError::ToolMissing { tool }.into(),
            other => anyhow::Error::new(other),
        })
}

/// Prepared collection run
pub struct ScanWorkflow {
    settings: ResolvedSettings,
}

impl ScanWorkflow {
    /// Resolve settings and check the tools
    pub fn prepare(options: &ToolOptions, working_dir: &Path) -> Result<Self> {
        let settings = resolve_settings(options, working_dir)?;
        preflight(&settings.collector)?;
        log::debug!("resolved settings: {:?}", settings);
        Ok(Self { settings })
    }

    /// Settings in effect
    pub fn settings(&self) -> &ResolvedSettings {
        &self.settings
    }

    /// Collect a single tree
    pub fn collect(&self, root: &Path) -> Result<Dataset> {
        let collector = DatasetCollector::new(self.settings.collector.clone());
        self.in_pool(|| collector.collect(root))?
            .map_err(|e| CodeSizeError::from(e).into())
    }

    /// Collect both trees concurrently
    pub fn collect_pair(&self, before: &Path, after: &Path) -> Result<(Dataset, Dataset)> {
        let collector = DatasetCollector::new(self.settings.collector.clone());
        self.in_pool(|| collector.collect_pair(before, after))?
            .map_err(|e| CodeSizeError::from(e).into())
    }

    fn in_pool<T, F>(&self, op: F) -> Result<T>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match self.settings.jobs {
            Some(jobs) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()
                    .context("Failed to create worker pool")?;
                Ok(pool.install(op))
            }
            None => Ok(op()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorFormatter;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_settings_without_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = resolve_settings(&ToolOptions::default(), temp.path()).unwrap();
        assert_eq!(settings.collector, CollectorConfig::default());
        assert_eq!(settings.top_n, 20);
    }

    #[test]
    fn test_resolve_settings_normalizes_size_args() {
        let temp = TempDir::new().unwrap();
        let options = ToolOptions {
            size_tool: Some("llvm-size".to_string()),
            size_args: vec!["A".to_string(), "-o".to_string(), "out".to_string()],
            ..ToolOptions::default()
        };

        let settings = resolve_settings(&options, temp.path()).unwrap();
        assert_eq!(settings.collector.size_tool, "llvm-size");
        assert_eq!(settings.collector.size_args, vec!["-A", "-o", "out"]);
    }

    #[test]
    fn test_resolve_settings_reads_working_dir_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "size-tool = \"mips-size\"\ntop-n = 3\n",
        )
        .unwrap();

        let options = ToolOptions {
            top: Some(7),
            ..ToolOptions::default()
        };
        let settings = resolve_settings(&options, temp.path()).unwrap();
        assert_eq!(settings.collector.size_tool, "mips-size");
        assert_eq!(settings.top_n, 7);
    }

    #[test]
    fn test_resolve_settings_missing_explicit_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let options = ToolOptions {
            config: Some(temp.path().join("absent.toml")),
            ..ToolOptions::default()
        };

        let err = resolve_settings(&options, temp.path()).unwrap_err();
        assert_eq!(ErrorFormatter::exit_code(&err), 65);
        assert!(format!("{:#}", err).contains("absent.toml"));
    }

    #[test]
    fn test_resolve_settings_invalid_override_exits_with_data_error() {
        let temp = TempDir::new().unwrap();
        let options = ToolOptions {
            jobs: Some(0),
            ..ToolOptions::default()
        };

        let err = resolve_settings(&options, temp.path()).unwrap_err();
        assert_eq!(ErrorFormatter::exit_code(&err), 65);
    }

    #[test]
    fn test_preflight_missing_tool_exits_127() {
        let config = CollectorConfig {
            file_tool: "nonexistent-file-xyz-123".to_string(),
            ..CollectorConfig::default()
        };

        let err = preflight(&config).unwrap_err();
        assert_eq!(ErrorFormatter::exit_code(&err), 127);
        assert!(err.to_string().contains("nonexistent-file-xyz-123"));
    }
}
