//! Horizontal before/after bar chart for the ranked lists

use console::style;
use std::fmt::{self, Write as _};

use crate::diff::{DiffRecord, DiffReport};
use crate::fmt::{format_change_percent, format_number};

/// Default bar width in columns
pub const DEFAULT_BAR_WIDTH: usize = 40;

const BAR: char = '█';

/// Render the top savings and top regressions as paired bars
///
/// Each file gets a `before` and an `after` bar scaled against the largest
/// byte count in its section, annotated with the absolute sizes and the signed
/// percentage (`-` for savings, `+` for regressions).
///
/// # Examples
///
/// ```
/// use codesize_diff::diff::{DiffRecord, DiffReport};
/// use codesize_diff::report::render_chart;
///
/// let saving = DiffRecord::new("bin/app", 1000, 800);
/// let report = DiffReport {
///     total_before: 1000,
///     total_after: 800,
///     only_before: 0,
///     only_after: 0,
///     matched: vec![saving.clone()],
///     zero_baseline: vec![],
///     top_savings: vec![saving],
///     top_regressions: vec![],
/// };
///
/// let chart = render_chart(&report, 10)?;
/// assert!(chart.contains("-20.00%"));
/// # Ok::<(), std::fmt::Error>(())
/// ```
pub fn render_chart(report: &DiffReport, bar_width: usize) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_section(&mut out, "Top savings by percentage", &report.top_savings, bar_width)?;
    write_section(
        &mut out,
        "Top regressions by percentage",
        &report.top_regressions,
        bar_width,
    )?;
    Ok(out)
}

fn write_section(
    out: &mut String,
    title: &str,
    records: &[DiffRecord],
    bar_width: usize,
) -> fmt::Result {
    writeln!(out, "{}", style(title).bold().underlined())?;

    if records.is_empty() {
        writeln!(out, "   {}", style("(none)").dim())?;
        return writeln!(out);
    }

    let scale = records
        .iter()
        .map(|r| r.decimal_before.max(r.decimal_after))
        .max()
        .unwrap_or(0);

    for record in records {
        let percent = record
            .percentage
            .map(format_change_percent)
            .unwrap_or_default();
        writeln!(out, "{}  {}", style(&record.filename).bold(), percent)?;

        let before_bar = bar(record.decimal_before, scale, bar_width);
        let after_bar = bar(record.decimal_after, scale, bar_width);
        let after_bar = if record.is_saving() {
            style(after_bar).green()
        } else {
            style(after_bar).red()
        };

        writeln!(
            out,
            "   before {:<width$} {}",
            style(before_bar).dim(),
            format_number(record.decimal_before),
            width = bar_width
        )?;
        writeln!(
            out,
            "   after  {:<width$} {}",
            after_bar,
            format_number(record.decimal_after),
            width = bar_width
        )?;
    }
    writeln!(out)
}

fn bar(value: u64, scale: u64, width: usize) -> String {
    if scale == 0 {
        return String::new();
    }
    let len = ((value as f64 / scale as f64) * width as f64).round() as usize;
    // Non-empty values always get at least one cell
    let len = if value > 0 { len.max(1) } else { 0 };
    BAR.to_string().repeat(len.min(width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::dataset::record;
    use crate::collector::Dataset;
    use crate::diff::DiffEngine;

    fn report() -> DiffReport {
        let before: Dataset = [record("bin/app", 1000), record("bin/tool", 400)]
            .into_iter()
            .collect();
        let after: Dataset = [record("bin/app", 800), record("bin/tool", 500)]
            .into_iter()
            .collect();
        DiffEngine::default().compare(&before, &after)
    }

    #[test]
    fn test_bar_scales_to_width() {
        assert_eq!(bar(100, 100, 10).chars().count(), 10);
        assert_eq!(bar(50, 100, 10).chars().count(), 5);
        assert_eq!(bar(0, 100, 10), "");
        assert_eq!(bar(1, 1_000_000, 10).chars().count(), 1);
        assert_eq!(bar(5, 0, 10), "");
    }

    #[test]
    fn test_chart_labels_savings_and_regressions() {
        let chart = render_chart(&report(), 20).unwrap();

        assert!(chart.contains("Top savings by percentage"));
        assert!(chart.contains("-20.00%"));
        assert!(chart.contains("+25.00%"));
        assert!(chart.contains("1,000"));
        assert!(chart.contains("500"));
    }

    #[test]
    fn test_chart_sections_in_order() {
        let chart = render_chart(&report(), 20).unwrap();
        let savings = chart.find("Top savings").unwrap();
        let regressions = chart.find("Top regressions").unwrap();
        assert!(savings < chart.find("bin/app").unwrap());
        assert!(regressions < chart.find("bin/tool").unwrap());
    }

    #[test]
    fn test_chart_with_empty_report_renders_placeholders() {
        let empty = DiffEngine::default().compare(&Dataset::default(), &Dataset::default());
        let chart = render_chart(&empty, 20).unwrap();
        assert_eq!(chart.matches("(none)").count(), 2);
    }
}
