#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! codesize-diff library
//!
//! Collects per-binary code size data from two build trees with the external
//! `file` and `size` tools, joins the results by build-relative filename and
//! ranks the largest relative savings and regressions. Everything the CLI does
//! is available programmatically.
//!
//! # Basic Example
//!
//! Parsing one file's `size` output:
//!
//! ```
//! use codesize_diff::collector::parse_size_output;
//!
//! let stdout = "   text\t   data\t    bss\t    dec\t    hex\tfilename\n\
//!               1200\t    300\t     20\t   1520\t    5f0\t/home/dev/llvm-build-1/bin/clang\n";
//!
//! let record = parse_size_output(stdout, "llvm-build-1").unwrap();
//! assert_eq!(record.filename, "/bin/clang");
//! assert_eq!(record.decimal_total, 1520);
//! ```
//!
//! # Advanced Example: Ranking Two Datasets
//!
//! ```
//! use codesize_diff::collector::{Dataset, SizeRecord};
//! use codesize_diff::diff::DiffEngine;
//!
//! let record = |name: &str, dec: u64| SizeRecord {
//!     text_bytes: dec,
//!     data_bytes: 0,
//!     bss_bytes: 0,
//!     decimal_total: dec,
//!     hex_total: format!("{dec:x}"),
//!     filename: name.to_string(),
//! };
//!
//! let before: Dataset = [record("/bin/a", 1000), record("/bin/b", 200)].into_iter().collect();
//! let after: Dataset = [record("/bin/a", 900), record("/bin/b", 300)].into_iter().collect();
//!
//! let report = DiffEngine::new(10).compare(&before, &after);
//! assert_eq!(report.top_savings[0].filename, "/bin/a");
//! assert_eq!(report.top_regressions[0].percentage, Some(-50.0));
//! assert_eq!(report.total_delta(), 0);
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Build tree scanning and size record collection
pub mod collector;
/// Configuration file and command-line override handling
pub mod config;
/// Dataset join and ranking
pub mod diff;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// Console, chart and JSON rendering
pub mod report;
/// Tool detection and version checking
pub mod tools;
