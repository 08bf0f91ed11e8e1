//! Berkeley `size` output parsing
//!
//! Expected format (GNU binutils / llvm-size `-B`):
//!
//! ```text
//!    text    data     bss     dec     hex filename
//!     164       0       0     164      a4 /work/build-1/libstubs.a
//! ```
//!
//! Columns in the data row are tab separated.

use super::dataset::{SizeRecord, SkipReason};
use super::path::normalize_path;

/// First token of the header line; its absence means the tool printed something else
pub const HEADER_MARKER: &str = "text";

/// Number of tab-separated columns in a data row
const COLUMN_COUNT: usize = 6;

/// Result of measuring one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeOutcome {
    /// The file was measured
    Record(SizeRecord),
    /// The file was excluded, with the reason
    Skip(SkipReason),
}

/// Parse `size` stdout into a record whose filename is normalized against `build_dir_name`
///
/// Only the first data row is read. Records whose `dec` column does not equal
/// `text + data + bss` are rejected.
///
/// # Examples
///
/// ```
/// use codesize_diff::collector::parse_size_output;
///
/// let stdout = "   text\t   data\t    bss\t    dec\t    hex\tfilename\n \
///               1000\t    200\t     24\t   1224\t    4c8\t/ci/build-a/bin/app\n";
/// let record = parse_size_output(stdout, "build-a").unwrap();
/// assert_eq!(record.decimal_total, 1224);
/// assert_eq!(record.filename, "/bin/app");
/// ```
pub fn parse_size_output(stdout: &str, build_dir_name: &str) -> Result<SizeRecord, SkipReason> {
    let mut lines = stdout.lines();

    let header = lines.next().unwrap_or_default();
    if header.split_whitespace().next() != Some(HEADER_MARKER) {
        return Err(malformed(format!("missing '{HEADER_MARKER}' header")));
    }

    let row = lines
        .next()
        .filter(|line| !line.trim().is_empty())
        .ok_or_else(|| malformed("no data row after header".to_string()))?;

    let columns: Vec<&str> = row.splitn(COLUMN_COUNT, '\t').collect();
    if columns.len() < COLUMN_COUNT {
        return Err(malformed(format!(
            "expected {COLUMN_COUNT} tab-separated columns, found {}",
            columns.len()
        )));
    }

    let text_bytes = parse_column(columns[0], "text")?;
    let data_bytes = parse_column(columns[1], "data")?;
    let bss_bytes = parse_column(columns[2], "bss")?;
    let decimal_total = parse_column(columns[3], "dec")?;
    let hex_total = columns[4].trim().to_string();
    let raw_filename = columns[5].trim_end();

    let record = SizeRecord {
        text_bytes,
        data_bytes,
        bss_bytes,
        decimal_total,
        hex_total,
        filename: normalize_path(raw_filename, build_dir_name).to_string(),
    };

    if !record.is_consistent() {
        return Err(SkipReason::TotalMismatch);
    }

    Ok(record)
}

fn parse_column(value: &str, name: &str) -> Result<u64, SkipReason> {
    value
        .trim()
        .parse()
        .map_err(|_| malformed(format!("{name} column is not an integer: '{}'", value.trim())))
}

fn malformed(detail: String) -> SkipReason {
    SkipReason::Malformed { detail }
}
