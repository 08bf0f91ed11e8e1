//! Size records and the per-tree dataset they are collected into

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Code-size metrics of one binary, as reported by a Berkeley-format `size` tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRecord {
    /// Size of the text (code) segment in bytes
    pub text_bytes: u64,
    /// Size of initialized data in bytes
    pub data_bytes: u64,
    /// Size of zero-initialized data in bytes
    pub bss_bytes: u64,
    /// `text + data + bss`
    pub decimal_total: u64,
    /// Total as printed by the tool in hexadecimal; informational only
    pub hex_total: String,
    /// Build-root-relative name, the join key across datasets
    pub filename: String,
}

impl SizeRecord {
    /// Whether the reported total matches the sum of its segments
    pub fn is_consistent(&self) -> bool {
        self.text_bytes
            .checked_add(self.data_bytes)
            .and_then(|sum| sum.checked_add(self.bss_bytes))
            == Some(self.decimal_total)
    }
}

/// Why a file found during the walk did not produce a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Size tool exited with the "unrecognized format" code
    UnsupportedFormat,
    /// Size tool exited with another non-zero code (`None` if killed by a signal)
    ToolFailed {
        /// Exit code reported by the tool
        code: Option<i32>,
    },
    /// Size tool succeeded but its output could not be parsed
    Malformed {
        /// What was wrong with the output
        detail: String,
    },
    /// `dec` column did not equal `text + data + bss`
    TotalMismatch,
    /// A subprocess did not finish within the configured timeout
    TimedOut,
    /// Directory entry could not be read during the walk
    Unreadable {
        /// Underlying error message
        detail: String,
    },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedFormat => write!(f, "unsupported binary format"),
            Self::ToolFailed { code: Some(code) } => write!(f, "size tool exited with code {code}"),
            Self::ToolFailed { code: None } => write!(f, "size tool terminated by signal"),
            Self::Malformed { detail } => write!(f, "malformed size output: {detail}"),
            Self::TotalMismatch => write!(f, "dec column does not equal text + data + bss"),
            Self::TimedOut => write!(f, "external tool timed out"),
            Self::Unreadable { detail } => write!(f, "unreadable entry: {detail}"),
        }
    }
}

/// A file that was excluded from the dataset, kept as an audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    /// Path of the skipped file
    pub path: PathBuf,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Size records collected from one build tree
///
/// Records keep discovery order. Filenames are unique: inserting a record for a
/// filename that is already present replaces the earlier values in place and
/// notes the filename in [`Dataset::duplicates`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    build_root: PathBuf,
    build_dir_name: String,
    records: Vec<SizeRecord>,
    #[serde(skip)]
    index: HashMap<String, usize>,
    skipped: Vec<SkippedFile>,
    duplicates: Vec<String>,
}

impl Dataset {
    /// Create an empty dataset for the given build root
    pub fn new(build_root: impl Into<PathBuf>) -> Self {
        let build_root = build_root.into();
        let build_dir_name = build_root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            build_root,
            build_dir_name,
            ..Self::default()
        }
    }

    /// Insert a record; returns `true` if it replaced an existing filename
    pub fn insert(&mut self, record: SizeRecord) -> bool {
        if let Some(&slot) = self.index.get(&record.filename) {
            log::warn!(
                "duplicate filename '{}' in {}, keeping the later record",
                record.filename,
                self.build_root.display()
            );
            self.duplicates.push(record.filename.clone());
            self.records[slot] = record;
            true
        } else {
            self.index.insert(record.filename.clone(), self.records.len());
            self.records.push(record);
            false
        }
    }

    /// Record a file that produced no size record
    pub fn skip(&mut self, path: impl Into<PathBuf>, reason: SkipReason) {
        self.skipped.push(SkippedFile {
            path: path.into(),
            reason,
        });
    }

    /// Look up a record by its normalized filename
    pub fn get(&self, filename: &str) -> Option<&SizeRecord> {
        self.index.get(filename).map(|&slot| &self.records[slot])
    }

    /// Records in discovery order
    pub fn records(&self) -> &[SizeRecord] {
        &self.records
    }

    /// Files excluded during collection, in discovery order
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Filenames that were reported more than once
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Build root this dataset was collected from
    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// Base name of the build root, used to trim tool output paths
    pub fn build_dir_name(&self) -> &str {
        &self.build_dir_name
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records were collected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of `decimal_total` over all records
    pub fn total_bytes(&self) -> u64 {
        self.records.iter().map(|r| r.decimal_total).sum()
    }
}

impl FromIterator<SizeRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = SizeRecord>>(iter: I) -> Self {
        let mut dataset = Dataset::default();
        for record in iter {
            dataset.insert(record);
        }
        dataset
    }
}

#[cfg(test)]
pub(crate) fn record(filename: &str, decimal_total: u64) -> SizeRecord {
    SizeRecord {
        text_bytes: decimal_total,
        data_bytes: 0,
        bss_bytes: 0,
        decimal_total,
        hex_total: format!("{:x}", decimal_total),
        filename: filename.to_string(),
    }
}
