//! Error types for dataset collection

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort collection of a build tree
///
/// Per-file problems never surface here; they are recorded as
/// [`SkipReason`](super::SkipReason)s on the dataset instead.
#[derive(Error, Debug)]
pub enum CollectError {
    /// Build root is missing or not a directory
    #[error("Build root not found: {0}")]
    BuildRootNotFound(PathBuf),

    /// File classification tool could not be executed
    #[error("Failed to run file classifier '{tool}' on {path}")]
    ClassifierFailed {
        /// Classifier program
        tool: String,
        /// File being classified
        path: PathBuf,
        /// Spawn error
        #[source]
        source: std::io::Error,
    },

    /// Size tool could not be executed
    #[error("Failed to run size tool '{tool}' on {path}")]
    SizeToolFailed {
        /// Size program
        tool: String,
        /// File being measured
        path: PathBuf,
        /// Spawn error
        #[source]
        source: std::io::Error,
    },
}
