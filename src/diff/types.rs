//! Diff result types

use serde::{Deserialize, Serialize};

/// Size change of one file present in both datasets
///
/// Positive `delta` means the second build is smaller (savings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffRecord {
    /// Normalized filename shared by both datasets
    pub filename: String,
    /// `decimal_total` in the first build
    pub decimal_before: u64,
    /// `decimal_total` in the second build
    pub decimal_after: u64,
    /// `decimal_before - decimal_after`
    pub delta: i64,
    /// `delta * 100 / decimal_before`; `None` when the first build reported zero bytes
    pub percentage: Option<f64>,
}

impl DiffRecord {
    /// Build the record for one matched filename
    pub fn new(filename: impl Into<String>, decimal_before: u64, decimal_after: u64) -> Self {
        let delta = signed_difference(decimal_before, decimal_after);
        let percentage = if decimal_before == 0 {
            None
        } else {
            Some((decimal_before as f64 - decimal_after as f64) * 100.0 / decimal_before as f64)
        };

        Self {
            filename: filename.into(),
            decimal_before,
            decimal_after,
            delta,
            percentage,
        }
    }

    /// Second build is smaller
    pub fn is_saving(&self) -> bool {
        self.delta > 0
    }

    /// Second build is larger
    pub fn is_regression(&self) -> bool {
        self.delta < 0
    }
}

/// Outcome of comparing two datasets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Sum of `decimal_total` over the whole first dataset
    pub total_before: u64,
    /// Sum of `decimal_total` over the whole second dataset
    pub total_after: u64,
    /// Files only present in the first dataset
    pub only_before: usize,
    /// Files only present in the second dataset
    pub only_after: usize,
    /// Every matched file, in join order (first dataset's order)
    pub matched: Vec<DiffRecord>,
    /// Matched files whose first-build size is zero, so no percentage exists
    pub zero_baseline: Vec<DiffRecord>,
    /// Largest relative savings first, at most `top_n`
    pub top_savings: Vec<DiffRecord>,
    /// Largest relative growth first, at most `top_n`
    pub top_regressions: Vec<DiffRecord>,
}

impl DiffReport {
    /// Files present in both datasets
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    /// `total_before - total_after`; positive means the second build is smaller overall
    pub fn total_delta(&self) -> i64 {
        signed_difference(self.total_before, self.total_after)
    }

    /// Overall change relative to the first build, if it has any bytes
    pub fn total_percentage(&self) -> Option<f64> {
        if self.total_before == 0 {
            None
        } else {
            let difference = self.total_before as f64 - self.total_after as f64;
            Some(difference * 100.0 / self.total_before as f64)
        }
    }

    /// Matched files that shrank
    pub fn improved_count(&self) -> usize {
        self.matched.iter().filter(|d| d.is_saving()).count()
    }

    /// Matched files that grew
    pub fn regressed_count(&self) -> usize {
        self.matched.iter().filter(|d| d.is_regression()).count()
    }

    /// Matched files with identical size
    pub fn unchanged_count(&self) -> usize {
        self.matched.iter().filter(|d| d.delta == 0).count()
    }
}

/// `before - after`, clamped to the `i64` range
fn signed_difference(before: u64, after: u64) -> i64 {
    let difference = i128::from(before) - i128::from(after);
    i64::try_from(difference).unwrap_or(if difference > 0 { i64::MAX } else { i64::MIN })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_record_savings_percentage() {
        let diff = DiffRecord::new("bin/app", 1000, 800);
        assert_eq!(diff.delta, 200);
        assert_eq!(diff.percentage, Some(20.0));
        assert!(diff.is_saving());
        assert!(!diff.is_regression());
    }

    #[test]
    fn test_diff_record_regression_percentage() {
        let diff = DiffRecord::new("bin/app", 800, 1000);
        assert_eq!(diff.delta, -200);
        assert_eq!(diff.percentage, Some(-25.0));
        assert!(diff.is_regression());
    }

    #[test]
    fn test_diff_record_zero_baseline_has_no_percentage() {
        let diff = DiffRecord::new("bin/empty", 0, 64);
        assert_eq!(diff.delta, -64);
        assert_eq!(diff.percentage, None);
    }

    #[test]
    fn test_deltas_beyond_i64_keep_their_sign() {
        let diff = DiffRecord::new("huge", u64::MAX, 0);
        assert_eq!(diff.delta, i64::MAX);
        assert!(diff.is_saving());

        let diff = DiffRecord::new("huge", 1, u64::MAX);
        assert_eq!(diff.delta, i64::MIN);
        assert!(diff.is_regression());
        assert!(diff.percentage.is_some_and(|p| p < 0.0));
    }

    #[test]
    fn test_total_percentage_with_empty_first_dataset() {
        let report = DiffReport {
            total_before: 0,
            total_after: 10,
            only_before: 0,
            only_after: 1,
            matched: vec![],
            zero_baseline: vec![],
            top_savings: vec![],
            top_regressions: vec![],
        };
        assert_eq!(report.total_delta(), -10);
        assert_eq!(report.total_percentage(), None);
    }
}
