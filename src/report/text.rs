//! Plain-text renderings of datasets and diff reports

use console::style;
use std::fmt::{self, Write as _};

use crate::collector::Dataset;
use crate::diff::{DiffRecord, DiffReport};
use crate::fmt::{
    format_bytes, format_change_bytes, format_change_percent, format_number, icon, CHART, GROW,
    INFO, MICROSCOPE, SHRINK, WARNING,
};

/// Width of the filename column in tables
const NAME_WIDTH: usize = 48;

/// Summary written to stdout by `compare`
///
/// Dataset sizes, the aggregate delta, improved/regressed counts and both
/// ranked lists.
pub fn render_summary(
    report: &DiffReport,
    before: &Dataset,
    after: &Dataset,
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "{} {}", icon(CHART), style("Code size comparison").bold())?;
    writeln!(out)?;
    write_dataset_line(&mut out, "Before:", before)?;
    write_dataset_line(&mut out, "After: ", after)?;
    writeln!(
        out,
        "   {} {} files (only before: {}, only after: {})",
        style("Matched:").bold(),
        report.matched_count(),
        report.only_before,
        report.only_after
    )?;
    writeln!(out)?;

    let delta = report.total_delta();
    let delta_icon = if delta < 0 { icon(GROW) } else { icon(SHRINK) };
    let percent = report
        .total_percentage()
        .map(format_change_percent)
        .unwrap_or_else(|| "n/a".to_string());
    let delta_text = format!("{} bytes ({})", format_change_bytes(delta), percent);
    let delta_text = if delta > 0 {
        style(delta_text).green().bold()
    } else if delta < 0 {
        style(delta_text).red().bold()
    } else {
        style(delta_text).bold()
    };
    writeln!(out, "{} {} {}", delta_icon, style("Delta:").bold(), delta_text)?;
    writeln!(
        out,
        "   improved: {}, regressed: {}, unchanged: {}",
        report.improved_count(),
        report.regressed_count(),
        report.unchanged_count()
    )?;

    if !report.zero_baseline.is_empty() {
        writeln!(
            out,
            "   {} {} files had no bytes in the first build and are not ranked",
            icon(INFO),
            report.zero_baseline.len()
        )?;
    }

    let skipped = before.skipped().len() + after.skipped().len();
    if skipped > 0 {
        writeln!(
            out,
            "   {} skipped files: {} before, {} after (--json lists reasons)",
            icon(WARNING),
            before.skipped().len(),
            after.skipped().len()
        )?;
    }

    write_ranking(&mut out, "Top savings", &report.top_savings)?;
    write_ranking(&mut out, "Top regressions", &report.top_regressions)?;

    Ok(out)
}

fn write_dataset_line(out: &mut String, label: &str, dataset: &Dataset) -> fmt::Result {
    writeln!(
        out,
        "   {} {} ({} files, {} bytes, {})",
        style(label).bold(),
        dataset.build_root().display(),
        dataset.len(),
        format_number(dataset.total_bytes()),
        format_bytes(dataset.total_bytes())
    )
}

fn write_ranking(out: &mut String, title: &str, records: &[DiffRecord]) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", style(format!("{}:", title)).bold())?;

    if records.is_empty() {
        writeln!(out, "   {}", style("(none)").dim())?;
        return Ok(());
    }

    for record in records {
        let percent = record
            .percentage
            .map(format_change_percent)
            .unwrap_or_default();
        writeln!(
            out,
            "   {:>9}  {:>12} -> {:<12}  {}",
            percent,
            format_number(record.decimal_before),
            format_number(record.decimal_after),
            record.filename
        )?;
    }
    Ok(())
}

/// Full per-file table written to stderr by `compare`
///
/// Every matched file in join order.
pub fn render_table(report: &DiffReport) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(
        out,
        "{:<width$} {:>12} {:>12} {:>12} {:>9}",
        "filename",
        "before",
        "after",
        "delta",
        "change",
        width = NAME_WIDTH
    )?;
    writeln!(out, "{}", "-".repeat(NAME_WIDTH + 49))?;

    for record in &report.matched {
        let percent = record
            .percentage
            .map(format_change_percent)
            .unwrap_or_else(|| "n/a".to_string());
        writeln!(
            out,
            "{:<width$} {:>12} {:>12} {:>12} {:>9}",
            record.filename,
            record.decimal_before,
            record.decimal_after,
            format_change_bytes(record.delta),
            percent,
            width = NAME_WIDTH
        )?;
    }

    Ok(out)
}

/// Listing of a single dataset for `scan`
pub fn render_dataset(dataset: &Dataset) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(
        out,
        "{} {} {}",
        icon(MICROSCOPE),
        style("Scanned").bold(),
        dataset.build_root().display()
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "{:>10} {:>10} {:>10} {:>10} {:>10}  filename",
        "text", "data", "bss", "dec", "hex"
    )?;

    for record in dataset.records() {
        writeln!(
            out,
            "{:>10} {:>10} {:>10} {:>10} {:>10}  {}",
            record.text_bytes,
            record.data_bytes,
            record.bss_bytes,
            record.decimal_total,
            record.hex_total,
            record.filename
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} files, {} bytes ({})",
        dataset.len(),
        format_number(dataset.total_bytes()),
        format_bytes(dataset.total_bytes())
    )?;

    if !dataset.duplicates().is_empty() {
        writeln!(
            out,
            "{} duplicate filenames (last one kept): {}",
            icon(WARNING),
            dataset.duplicates().join(", ")
        )?;
    }

    if !dataset.skipped().is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", style("Skipped:").bold())?;
        for skipped in dataset.skipped() {
            writeln!(out, "   {}: {}", skipped.path.display(), skipped.reason)?;
        }
    }

    Ok(out)
}
