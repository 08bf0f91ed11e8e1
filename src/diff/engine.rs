//! Join and rank logic

use std::cmp::Ordering;
use std::collections::HashSet;

use super::types::{DiffRecord, DiffReport};
use crate::collector::Dataset;

/// Default length of the ranked lists
pub const DEFAULT_TOP_N: usize = 20;

/// Joins two datasets by filename and ranks the size changes
#[derive(Debug, Clone, Copy)]
pub struct DiffEngine {
    top_n: usize,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

impl DiffEngine {
    /// Create an engine keeping at most `top_n` entries per ranked list
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Compare `before` against `after`
    ///
    /// Only filenames present in both datasets produce a [`DiffRecord`]. Totals
    /// cover every record of each dataset. Records with a zero baseline are kept
    /// in `matched` and `zero_baseline` but never ranked. Ranking is stable, so
    /// equal percentages keep their join order.
    ///
    /// # Examples
    ///
    /// ```
    /// use codesize_diff::collector::{Dataset, SizeRecord};
    /// use codesize_diff::diff::DiffEngine;
    ///
    /// let record = |dec: u64| SizeRecord {
    ///     text_bytes: dec,
    ///     data_bytes: 0,
    ///     bss_bytes: 0,
    ///     decimal_total: dec,
    ///     hex_total: format!("{dec:x}"),
    ///     filename: "bin/app".to_string(),
    /// };
    /// let before: Dataset = [record(1000)].into_iter().collect();
    /// let after: Dataset = [record(800)].into_iter().collect();
    ///
    /// let report = DiffEngine::default().compare(&before, &after);
    /// assert_eq!(report.top_savings.len(), 1);
    /// assert_eq!(report.top_savings[0].percentage, Some(20.0));
    /// ```
    pub fn compare(&self, before: &Dataset, after: &Dataset) -> DiffReport {
        let matched: Vec<DiffRecord> = before
            .records()
            .iter()
            .filter_map(|b| {
                after
                    .get(&b.filename)
                    .map(|a| DiffRecord::new(b.filename.as_str(), b.decimal_total, a.decimal_total))
            })
            .collect();

        let matched_names: HashSet<&str> = matched.iter().map(|d| d.filename.as_str()).collect();
        let only_before = before.len() - matched.len();
        let only_after = after
            .records()
            .iter()
            .filter(|a| !matched_names.contains(a.filename.as_str()))
            .count();

        let zero_baseline: Vec<DiffRecord> = matched
            .iter()
            .filter(|d| d.percentage.is_none())
            .cloned()
            .collect();

        let top_savings = self.rank(&matched, DiffRecord::is_saving, |a, b| b.total_cmp(&a));
        let top_regressions = self.rank(&matched, DiffRecord::is_regression, |a, b| a.total_cmp(&b));

        log::debug!(
            "matched {} files ({} only before, {} only after, {} zero baseline)",
            matched.len(),
            only_before,
            only_after,
            zero_baseline.len()
        );

        DiffReport {
            total_before: before.total_bytes(),
            total_after: after.total_bytes(),
            only_before,
            only_after,
            matched,
            zero_baseline,
            top_savings,
            top_regressions,
        }
    }

    fn rank(
        &self,
        matched: &[DiffRecord],
        qualifies: fn(&DiffRecord) -> bool,
        order: fn(f64, f64) -> Ordering,
    ) -> Vec<DiffRecord> {
        let mut ranked: Vec<(f64, &DiffRecord)> = matched
            .iter()
            .filter(|d| qualifies(d))
            .filter_map(|d| d.percentage.map(|p| (p, d)))
            .collect();

        // Vec::sort_by is stable
        ranked.sort_by(|(a, _), (b, _)| order(*a, *b));
        ranked
            .into_iter()
            .take(self.top_n)
            .map(|(_, d)| d.clone())
            .collect()
    }
}
