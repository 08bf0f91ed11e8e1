//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Microscope emoji for scanning
pub const MICROSCOPE: Emoji = Emoji("🔍", ">>");

/// Down arrow for savings
pub const SHRINK: Emoji = Emoji("📉", "-");

/// Up arrow for regressions
pub const GROW: Emoji = Emoji("📈", "+");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Pick the emoji or its plain fallback
///
/// `--no-emoji` exports `NO_EMOJI`, which always selects the fallback.
pub fn icon(emoji: Emoji<'static, 'static>) -> &'static str {
    if std::env::var_os("NO_EMOJI").is_some() || !console::Term::stdout().features().wants_emoji() {
        emoji.1
    } else {
        emoji.0
    }
}

/// Format bytes as human-readable size string
///
/// # Examples
///
/// ```
/// use codesize_diff::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format an integer with `,` thousands separators
///
/// # Examples
///
/// ```
/// use codesize_diff::fmt::format_number;
///
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(-1000), "-1,000");
/// ```
pub fn format_number(value: impl Into<i128>) -> String {
    let value: i128 = value.into();
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a percentage change as seen from the second build
///
/// A positive `percentage` is a saving and is shown with `-`; a negative one is
/// growth and is shown with `+`.
///
/// # Examples
///
/// ```
/// use codesize_diff::fmt::format_change_percent;
///
/// assert_eq!(format_change_percent(20.0), "-20.00%");
/// assert_eq!(format_change_percent(-25.0), "+25.00%");
/// assert_eq!(format_change_percent(0.0), "0.00%");
/// ```
pub fn format_change_percent(percentage: f64) -> String {
    if percentage > 0.0 {
        format!("-{:.2}%", percentage)
    } else if percentage < 0.0 {
        format!("+{:.2}%", -percentage)
    } else {
        "0.00%".to_string()
    }
}

/// Format a byte delta (`before - after`) with the same sign convention as
/// [`format_change_percent`]
pub fn format_change_bytes(delta: i64) -> String {
    match delta {
        0 => "0".to_string(),
        d if d > 0 => format!("-{}", format_number(d)),
        d => format!("+{}", format_number(-i128::from(d))),
    }
}
