//! JSON output for `--json`

use serde::Serialize;
use std::path::Path;

use crate::collector::{Dataset, SkippedFile};
use crate::diff::DiffReport;

/// Per-tree summary embedded in the compare output
#[derive(Debug, Serialize)]
pub struct DatasetSummary<'a> {
    /// Absolute build root
    pub build_root: &'a Path,
    /// Base name used to normalize filenames
    pub build_dir_name: &'a str,
    /// Number of records
    pub files: usize,
    /// Sum of `decimal_total`
    pub total_bytes: u64,
    /// Skip audit trail
    pub skipped: &'a [SkippedFile],
    /// Filenames seen more than once
    pub duplicates: &'a [String],
}

impl<'a> From<&'a Dataset> for DatasetSummary<'a> {
    fn from(dataset: &'a Dataset) -> Self {
        Self {
            build_root: dataset.build_root(),
            build_dir_name: dataset.build_dir_name(),
            files: dataset.len(),
            total_bytes: dataset.total_bytes(),
            skipped: dataset.skipped(),
            duplicates: dataset.duplicates(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompareOutput<'a> {
    before: DatasetSummary<'a>,
    after: DatasetSummary<'a>,
    total_delta: i64,
    total_percentage: Option<f64>,
    improved: usize,
    regressed: usize,
    unchanged: usize,
    report: &'a DiffReport,
}

/// Serialize a comparison as pretty JSON
pub fn compare_json(
    report: &DiffReport,
    before: &Dataset,
    after: &Dataset,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CompareOutput {
        before: before.into(),
        after: after.into(),
        total_delta: report.total_delta(),
        total_percentage: report.total_percentage(),
        improved: report.improved_count(),
        regressed: report.regressed_count(),
        unchanged: report.unchanged_count(),
        report,
    })
}

/// Serialize a single dataset as pretty JSON
pub fn dataset_json(dataset: &Dataset) -> serde_json::Result<String> {
    serde_json::to_string_pretty(dataset)
}
