//! Configuration for codesize-diff
//!
//! This module provides:
//! - .codesize-diff.toml config file support
//! - Merging of command-line overrides into collector settings

pub mod file;
pub mod loader;
pub mod resolver;

pub use file::{ConfigFile, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
pub use resolver::{ConfigResolver, Overrides, ResolvedSettings};
