//! Tool detection and verification module
//!
//! Resolves the two external programs every scan depends on:
//! - the file classifier (`file`)
//! - the Berkeley-format size reporter (`size`, `llvm-size`, a cross `*-size`)

use crate::collector::CollectorConfig;
use crate::infra::{CommandExecutor, RealCommandExecutor};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Upper bound for a `--version` probe
const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur during tool operations
#[derive(Error, Debug)]
pub enum ToolError {
    /// I/O error during tool execution
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tool execution failed
    #[error("Failed to get version for {0}")]
    VersionFailed(String),

    /// Required tool is missing
    #[error("Required tool missing: {0}")]
    MissingTool(String),
}

/// An external program resolved through `PATH` (or given as a path)
///
/// # Examples
///
/// ```no_run
/// use codesize_diff::tools::Tool;
///
/// let size = Tool::new("size tool", "llvm-size");
/// if size.is_installed() {
///     println!("{}", size.version()?);
/// }
/// # Ok::<(), codesize_diff::tools::ToolError>(())
/// ```
#[derive(Debug)]
pub struct Tool<CE: CommandExecutor = RealCommandExecutor> {
    /// Human-readable role
    pub name: &'static str,
    /// Binary name or path
    pub binary: String,
    cmd_executor: CE,
}

impl<CE: CommandExecutor> Tool<CE> {
    /// Create a new Tool with a custom command executor
    pub fn with_executor(name: &'static str, binary: impl Into<String>, cmd_executor: CE) -> Self {
        Self {
            name,
            binary: binary.into(),
            cmd_executor,
        }
    }

    /// Full path of the executable, if it can be found
    pub fn resolve(&self) -> Result<PathBuf, ToolError> {
        which::which(&self.binary).map_err(|_| ToolError::MissingTool(self.binary.clone()))
    }

    /// Check if the tool is installed and available in PATH
    pub fn is_installed(&self) -> bool {
        self.resolve().is_ok()
    }

    /// First line of `<tool> --version`
    pub fn version(&self) -> Result<String, ToolError> {
        let output = self.cmd_executor.execute(
            |cmd| cmd.arg("--version"),
            &self.binary,
            Some(VERSION_TIMEOUT),
        )?;

        if !output.status.success() {
            return Err(ToolError::VersionFailed(self.name.to_string()));
        }

        let version = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or("")
            .to_string();

        Ok(version)
    }

    /// Check and report the tool status
    pub fn check(&self) -> ToolStatus {
        if self.is_installed() {
            match self.version() {
                Ok(version) => ToolStatus::Available(version),
                Err(_) => ToolStatus::InstalledButVersionUnknown,
            }
        } else {
            ToolStatus::Missing
        }
    }
}

impl Tool<RealCommandExecutor> {
    /// Create a new Tool with real command execution
    pub fn new(name: &'static str, binary: impl Into<String>) -> Self {
        Self::with_executor(name, binary, RealCommandExecutor)
    }
}

/// Status of a tool check
#[derive(Debug)]
pub enum ToolStatus {
    /// Tool is available and version was successfully retrieved
    Available(String),
    /// Tool binary exists but version check failed
    InstalledButVersionUnknown,
    /// Tool binary not found
    Missing,
}

/// The classifier and size tools a collector run needs
pub struct ToolChain<CE: CommandExecutor = RealCommandExecutor> {
    /// File classification tool
    pub file: Tool<CE>,
    /// Size reporting tool
    pub size: Tool<CE>,
}

impl ToolChain<RealCommandExecutor> {
    /// Tools named by a collector configuration
    pub fn from_config(config: &CollectorConfig) -> Self {
        Self::with_executor(config, RealCommandExecutor)
    }
}

impl<CE: CommandExecutor + Clone> ToolChain<CE> {
    /// Create a new ToolChain with a custom command executor
    pub fn with_executor(config: &CollectorConfig, cmd_executor: CE) -> Self {
        Self {
            file: Tool::with_executor("file classifier", &config.file_tool, cmd_executor.clone()),
            size: Tool::with_executor("size tool", &config.size_tool, cmd_executor),
        }
    }
}

impl<CE: CommandExecutor> ToolChain<CE> {
    /// Verify both tools resolve, returning the first missing binary
    ///
    /// Versions are only logged; a tool without `--version` support is still usable.
    pub fn check_required(&self) -> Result<(), ToolError> {
        for tool in [&self.file, &self.size] {
            match tool.check() {
                ToolStatus::Available(version) => {
                    log::debug!("{}: {} ({})", tool.name, tool.binary, version);
                }
                ToolStatus::InstalledButVersionUnknown => {
                    log::debug!("{}: {} (version unknown)", tool.name, tool.binary);
                }
                ToolStatus::Missing => return Err(ToolError::MissingTool(tool.binary.clone())),
            }
        }
        Ok(())
    }
}
