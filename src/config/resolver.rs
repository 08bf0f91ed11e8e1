//! Settings resolution
//!
//! Layers command-line overrides on top of the configuration file.

use super::file::ConfigFile;
use crate::collector::CollectorConfig;
use anyhow::Result;
use std::time::Duration;

/// Values given on the command line; `None` keeps the config file value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// Size tool binary
    pub size_tool: Option<String>,
    /// Only replaces the configured args when non-empty
    pub size_args: Vec<String>,
    /// File classification binary
    pub file_tool: Option<String>,
    /// Ranked list length
    pub top_n: Option<usize>,
    /// Per-subprocess timeout
    pub timeout_secs: Option<u64>,
    /// Collection threads
    pub jobs: Option<usize>,
}

/// Fully resolved run settings
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    /// Collector settings
    pub collector: CollectorConfig,
    /// Ranked list length
    pub top_n: usize,
    /// Collection threads; `None` uses the global rayon pool
    pub jobs: Option<usize>,
}

/// Merges a [`ConfigFile`] with [`Overrides`]
///
/// # Examples
///
/// ```
/// use codesize_diff::config::{ConfigFile, ConfigResolver, Overrides};
///
/// let overrides = Overrides {
///     size_tool: Some("llvm-size".to_string()),
///     top_n: Some(5),
///     ..Overrides::default()
/// };
/// let settings = ConfigResolver::resolve(&ConfigFile::default(), &overrides)?;
/// assert_eq!(settings.collector.size_tool, "llvm-size");
/// assert_eq!(settings.top_n, 5);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct ConfigResolver;

impl ConfigResolver {
    /// Apply overrides and validate the merged result
    pub fn resolve(config: &ConfigFile, overrides: &Overrides) -> Result<ResolvedSettings> {
        let mut merged = config.clone();

        if let Some(ref tool) = overrides.size_tool {
            merged.size_tool = tool.clone();
        }
        if !overrides.size_args.is_empty() {
            merged.size_args = overrides.size_args.clone();
        }
        if let Some(ref tool) = overrides.file_tool {
            merged.file_tool = tool.clone();
        }
        if let Some(top_n) = overrides.top_n {
            merged.top_n = top_n;
        }
        if let Some(secs) = overrides.timeout_secs {
            merged.timeout_secs = secs;
        }
        if overrides.jobs.is_some() {
            merged.jobs = overrides.jobs;
        }

        merged.validate()?;

        let timeout = match merged.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(ResolvedSettings {
            collector: CollectorConfig {
                size_tool: merged.size_tool,
                size_args: merged.size_args,
                file_tool: merged.file_tool,
                known_extensions: merged.archive_extensions,
                excluded_extensions: merged.excluded_extensions,
                timeout,
            },
            top_n: merged.top_n,
            jobs: merged.jobs,
        })
    }
}
