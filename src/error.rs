//! Top-level error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes
//! - Proper exit codes for scripts and CI
//!
//! # Examples
//!
//! ```
//! use codesize_diff::error::{CodeSizeError, ErrorFormatter};
//!
//! let err = anyhow::Error::new(CodeSizeError::ToolMissing {
//!     tool: "llvm-size".to_string(),
//! });
//!
//! assert_eq!(ErrorFormatter::exit_code(&err), 127);
//! assert!(ErrorFormatter::format(&err).contains("llvm-size"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::collector::CollectError;

/// codesize-diff errors with contextual suggestions
#[derive(Error, Debug)]
pub enum CodeSizeError {
    /// External tool not found in PATH
    #[error("Tool not installed: {tool}")]
    ToolMissing {
        /// Tool name or path as given
        tool: String,
    },

    /// Build root does not exist or is not a directory
    #[error("Build root not found: {}", path.display())]
    BuildRootNotFound {
        /// Path given on the command line
        path: PathBuf,
    },

    /// External tool exists but could not be executed
    #[error("Failed to execute {tool}")]
    ToolExecution {
        /// Tool name
        tool: String,
        #[source]
        /// Spawn error
        source: std::io::Error,
    },

    /// Configuration file failed to parse or validate
    #[error("Invalid configuration: {}", path.display())]
    ConfigInvalid {
        /// Config file path
        path: PathBuf,
        /// Parser or validation message
        reason: String,
    },

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl From<CollectError> for CodeSizeError {
    fn from(err: CollectError) -> Self {
        match err {
            CollectError::BuildRootNotFound(path) => Self::BuildRootNotFound { path },
            CollectError::ClassifierFailed { tool, source, .. }
            | CollectError::SizeToolFailed { tool, source, .. } => {
                if source.kind() == std::io::ErrorKind::NotFound {
                    Self::ToolMissing { tool }
                } else {
                    Self::ToolExecution { tool, source }
                }
            }
        }
    }
}

impl CodeSizeError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use codesize_diff::error::CodeSizeError;
    ///
    /// let error = CodeSizeError::ToolMissing { tool: "size".to_string() };
    /// assert!(error.suggestion().unwrap().contains("binutils"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ToolMissing { tool } => Some(format!(
                "Install binutils (or your toolchain's equivalent) or pass the full path to '{}'",
                tool
            )),
            Self::BuildRootNotFound { path } => Some(format!(
                "Check that {} is an existing build directory",
                path.display()
            )),
            Self::ToolExecution { tool, .. } => {
                Some(format!("Check that {} is executable for this host", tool))
            }
            Self::ConfigInvalid { reason, .. } => Some(format!(
                "Fix the configuration file: {}",
                reason
            )),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Follows sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use codesize_diff::error::CodeSizeError;
    /// use std::path::PathBuf;
    ///
    /// let error = CodeSizeError::BuildRootNotFound { path: PathBuf::from("build") };
    /// assert_eq!(error.exit_code(), 66);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolMissing { .. } => 127, // Command not found (Unix convention)
            Self::BuildRootNotFound { .. } => 66, // EX_NOINPUT
            Self::ToolExecution { .. } => 69, // EX_UNAVAILABLE
            Self::ConfigInvalid { .. } => 65, // EX_DATAERR
            Self::Io { .. } => 74, // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(suggestion) = Self::find(error).and_then(CodeSizeError::suggestion) {
            output.push_str(&format!(
                "\n{} {}\n",
                style("help:").cyan().bold(),
                suggestion
            ));
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        Self::find(error).map_or(1, CodeSizeError::exit_code)
    }

    // Context layers wrap the typed error, so search the whole chain
    fn find(error: &anyhow::Error) -> Option<&CodeSizeError> {
        error
            .chain()
            .find_map(|cause| cause.downcast_ref::<CodeSizeError>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_tool_missing_has_suggestion() {
        let err = CodeSizeError::ToolMissing {
            tool: "mips-size".to_string(),
        };

        let suggestion = err
            .suggestion()
            .expect("ToolMissing should have suggestion");
        assert!(suggestion.contains("mips-size"));
    }

    #[test]
    fn test_exit_codes_follow_conventions() {
        let tool_err = CodeSizeError::ToolMissing {
            tool: "size".to_string(),
        };
        assert_eq!(tool_err.exit_code(), 127);

        let exec_err = CodeSizeError::ToolExecution {
            tool: "size".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(exec_err.exit_code(), 69);

        let config_err = CodeSizeError::ConfigInvalid {
            path: PathBuf::from(".codesize-diff.toml"),
            reason: "top-n must be at least 1".to_string(),
        };
        assert_eq!(config_err.exit_code(), 65);

        let io_err = CodeSizeError::Io {
            context: "writing report".to_string(),
            source: std::io::Error::other("broken pipe"),
        };
        assert_eq!(io_err.exit_code(), 74);
    }

    #[test]
    fn test_collect_error_missing_build_root_converts() {
        let err: CodeSizeError = CollectError::BuildRootNotFound(PathBuf::from("/nope")).into();
        assert_eq!(err.exit_code(), 66);
        assert!(err.to_string().contains("/nope"));
    }

    #[test]
    fn test_collect_error_not_found_spawn_becomes_tool_missing() {
        let err: CodeSizeError = CollectError::SizeToolFailed {
            tool: "nanomips-elf-size".to_string(),
            path: PathBuf::from("bin/app"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        }
        .into();
        assert!(matches!(err, CodeSizeError::ToolMissing { ref tool } if tool == "nanomips-elf-size"));
    }

    #[test]
    fn test_collect_error_other_spawn_becomes_tool_execution() {
        let err: CodeSizeError = CollectError::ClassifierFailed {
            tool: "file".to_string(),
            path: PathBuf::from("bin/app"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert_eq!(err.exit_code(), 69);
    }

    #[test]
    fn test_formatter_finds_error_behind_context() {
        let err = Err::<(), _>(CodeSizeError::BuildRootNotFound {
            path: PathBuf::from("build-a"),
        })
        .context("Failed to collect first build tree")
        .unwrap_err();

        assert_eq!(ErrorFormatter::exit_code(&err), 66);
        let formatted = ErrorFormatter::format(&err);
        assert!(formatted.contains("Failed to collect first build tree"));
        assert!(formatted.contains("caused by:"));
        assert!(formatted.contains("help:"));
    }

    #[test]
    fn test_formatter_generic_error_exit_code() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(ErrorFormatter::exit_code(&err), 1);
        assert!(!ErrorFormatter::format(&err).contains("help:"));
    }
}
