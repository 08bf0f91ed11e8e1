//! Configuration file data structures

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::collector::classifier::normalize_extension;
use crate::diff::DEFAULT_TOP_N;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".codesize-diff.toml";

/// codesize-diff configuration file structure
///
/// Every key is optional; missing keys fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConfigFile {
    /// Berkeley-format size tool (`size`, `llvm-size`, a cross `*-size`)
    pub size_tool: String,

    /// Flags passed to the size tool before each file
    pub size_args: Vec<String>,

    /// File classification tool
    pub file_tool: String,

    /// Length of the top savings / regressions lists
    pub top_n: usize,

    /// Per-subprocess timeout in seconds (0 disables)
    pub timeout_secs: u64,

    /// Extensions admitted without running the file tool
    pub archive_extensions: Vec<String>,

    /// Extensions never scanned directly
    pub excluded_extensions: Vec<String>,

    /// Worker threads for collection (defaults to the number of CPUs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            size_tool: "size".to_string(),
            size_args: Vec::new(),
            file_tool: "file".to_string(),
            top_n: DEFAULT_TOP_N,
            timeout_secs: 60,
            archive_extensions: vec!["a".to_string(), "so".to_string()],
            excluded_extensions: vec!["o".to_string()],
            jobs: None,
        }
    }
}

impl ConfigFile {
    /// Validate value ranges
    ///
    /// # Examples
    ///
    /// ```
    /// use codesize_diff::config::ConfigFile;
    ///
    /// assert!(ConfigFile::default().validate().is_ok());
    ///
    /// let bad = ConfigFile { top_n: 0, ..ConfigFile::default() };
    /// assert!(bad.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            anyhow::bail!("top-n must be at least 1");
        }

        if self.jobs == Some(0) {
            anyhow::bail!("jobs must be at least 1");
        }

        if self.size_tool.trim().is_empty() {
            anyhow::bail!("size-tool cannot be empty");
        }

        if self.file_tool.trim().is_empty() {
            anyhow::bail!("file-tool cannot be empty");
        }

        let excluded: HashSet<String> = self
            .excluded_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .collect();
        if let Some(ext) = self
            .archive_extensions
            .iter()
            .find(|ext| excluded.contains(&normalize_extension(ext)))
        {
            anyhow::bail!(
                "extension '{}' is listed in both archive-extensions and excluded-extensions",
                ext
            );
        }

        Ok(())
    }
}
