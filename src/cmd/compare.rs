//! Compare command implementation
//!
//! Handles the `codesize-diff compare` command which collects two build trees
//! and reports per-file code size savings and regressions

use anyhow::{Context, Result};
use std::env;
use std::io::Write;
use std::path::PathBuf;

use crate::cmd::workflow::{ScanWorkflow, ToolOptions};
use crate::collector::Dataset;
use crate::diff::{DiffEngine, DiffReport};
use crate::error::CodeSizeError;
use crate::report;

/// Options for `codesize-diff compare`
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// First (baseline) build tree
    pub before: PathBuf,
    /// Second build tree
    pub after: PathBuf,
    /// Tool selection and limits
    pub tools: ToolOptions,
    /// Render the bar chart after the summary
    pub chart: bool,
    /// Emit JSON instead of text
    pub json: bool,
}

/// Compare the code size of two build trees
///
/// Prints the summary (or JSON) to stdout and the full per-file table to
/// stderr.
///
/// # Examples
///
/// ```no_run
/// use codesize_diff::cmd::compare::{cmd_compare, CompareOptions};
///
/// cmd_compare(&CompareOptions {
///     before: "llvm-build-1".into(),
///     after: "llvm-build-2".into(),
///     ..CompareOptions::default()
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - Either build root doesn't exist
/// - The file or size tool is not installed or cannot run
/// - The configuration is invalid
pub fn cmd_compare(options: &CompareOptions) -> Result<()> {
    let working_dir = env::current_dir().context("Failed to determine working directory")?;
    let workflow = ScanWorkflow::prepare(&options.tools, &working_dir)?;

    let (before, after) = workflow.collect_pair(&options.before, &options.after)?;
    let report = DiffEngine::new(workflow.settings().top_n).compare(&before, &after);

    if !before.is_empty() && !after.is_empty() && report.matched_count() == 0 {
        log::warn!(
            "no filenames matched between {} and {}",
            before.build_root().display(),
            after.build_root().display()
        );
    }

    present(options, &report, &before, &after)
}

fn present(
    options: &CompareOptions,
    report: &DiffReport,
    before: &Dataset,
    after: &Dataset,
) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if options.json {
        let json = report::compare_json(report, before, after)
            .context("Failed to serialize comparison")?;
        writeln!(out, "{}", json).map_err(|e| io_error("writing JSON report", e))?;
        return Ok(());
    }

    let table = report::render_table(report).context("Failed to format diff table")?;
    eprint!("{}", table);

    let summary =
        report::render_summary(report, before, after).context("Failed to format summary")?;
    write!(out, "{}", summary).map_err(|e| io_error("writing summary", e))?;

    if options.chart {
        let chart = report::render_chart(report, report::DEFAULT_BAR_WIDTH)
            .context("Failed to format chart")?;
        writeln!(out).map_err(|e| io_error("writing chart", e))?;
        write!(out, "{}", chart).map_err(|e| io_error("writing chart", e))?;
    }

    Ok(())
}

fn io_error(context: &str, source: std::io::Error) -> anyhow::Error {
    CodeSizeError::Io {
        context: context.to_string(),
        source,
    }
    .into()
}
