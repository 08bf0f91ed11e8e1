//! Command handlers for codesize-diff CLI
//!
//! Each submodule handles a specific CLI command; `workflow` holds the
//! collection steps they share.

pub mod args;
pub mod compare;
pub mod completions;
pub mod scan;
pub mod workflow;

// Re-export command functions for convenient access
pub use compare::{cmd_compare, CompareOptions};
pub use completions::cmd_completions;
pub use scan::cmd_scan;
pub use workflow::{ScanWorkflow, ToolOptions};
