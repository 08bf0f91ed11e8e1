//! Scan command implementation
//!
//! Handles the `codesize-diff scan` command which collects a single build
//! tree and lists every size record

use anyhow::{Context, Result};
use std::env;
use std::io::Write;
use std::path::Path;

use crate::cmd::workflow::{ScanWorkflow, ToolOptions};
use crate::error::CodeSizeError;
use crate::report;

/// Collect one build tree and print its dataset
///
/// # Examples
///
/// ```no_run
/// use codesize_diff::cmd::scan::cmd_scan;
/// use codesize_diff::cmd::workflow::ToolOptions;
/// use std::path::Path;
///
/// cmd_scan(Path::new("llvm-build-1"), &ToolOptions::default(), false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn cmd_scan(root: &Path, tools: &ToolOptions, json: bool) -> Result<()> {
    let working_dir = env::current_dir().context("Failed to determine working directory")?;
    let workflow = ScanWorkflow::prepare(tools, &working_dir)?;
    let dataset = workflow.collect(root)?;

    let rendered = if json {
        report::dataset_json(&dataset).context("Failed to serialize dataset")?
    } else {
        report::render_dataset(&dataset).context("Failed to format dataset")?
    };

    let stdout = std::io::stdout();
    writeln!(stdout.lock(), "{}", rendered.trim_end()).map_err(|source| CodeSizeError::Io {
        context: "writing dataset".to_string(),
        source,
    })?;

    Ok(())
}
