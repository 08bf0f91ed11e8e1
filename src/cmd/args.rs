//! Size tool argument normalization

/// Flag whose value is passed through untouched
const OUTPUT_FLAG: &str = "-o";

/// Prefix `-` to bare size tool arguments
///
/// Lets flags be written without their dash on the command line
/// (`compare a b size A` runs `size -A`). An argument directly after `-o` is
/// a value and stays as given. Empty arguments are dropped.
///
/// # Examples
///
/// ```
/// use codesize_diff::cmd::args::normalize_tool_args;
///
/// let args = ["A", "-t", "-o", "x", "radix=16"].map(String::from);
/// assert_eq!(
///     normalize_tool_args(&args),
///     vec!["-A", "-t", "-o", "x", "-radix=16"]
/// );
/// ```
pub fn normalize_tool_args(args: &[String]) -> Vec<String> {
    let mut normalized = Vec::with_capacity(args.len());
    let mut previous: Option<&str> = None;

    for arg in args.iter().filter(|a| !a.is_empty()) {
        if arg.starts_with('-') || previous == Some(OUTPUT_FLAG) {
            normalized.push(arg.clone());
        } else {
            normalized.push(format!("-{}", arg));
        }
        previous = Some(arg.as_str());
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_bare_first_argument_is_prefixed() {
        assert_eq!(normalize_tool_args(&owned(&["B"])), vec!["-B"]);
    }

    #[test]
    fn test_flags_pass_through() {
        let args = owned(&["-A", "--format=berkeley"]);
        assert_eq!(normalize_tool_args(&args), args);
    }

    #[test]
    fn test_value_after_output_flag_is_kept() {
        assert_eq!(
            normalize_tool_args(&owned(&["-o", "report.txt", "d"])),
            vec!["-o", "report.txt", "-d"]
        );
    }

    #[test]
    fn test_output_flag_as_last_argument_does_not_affect_first() {
        assert_eq!(normalize_tool_args(&owned(&["t", "-o"])), vec!["-t", "-o"]);
    }

    #[test]
    fn test_empty_input_and_empty_arguments() {
        assert!(normalize_tool_args(&[]).is_empty());
        assert_eq!(normalize_tool_args(&owned(&["", "x"])), vec!["-x"]);
    }
}
