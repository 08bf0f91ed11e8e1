//! Build-root-relative naming of paths printed by the size tool

/// Trim everything up to and including the first occurrence of `build_dir_name`
///
/// Paths that do not mention the build directory are returned unchanged. Both
/// datasets of a comparison must be normalized this way, each with its own
/// build directory name, or the join produces no matches.
///
/// # Examples
///
/// ```
/// use codesize_diff::collector::normalize_path;
///
/// assert_eq!(normalize_path("/work/build-1/bin/app", "build-1"), "/bin/app");
/// assert_eq!(normalize_path("member.o", "build-1"), "member.o");
/// ```
pub fn normalize_path<'a>(raw: &'a str, build_dir_name: &str) -> &'a str {
    if build_dir_name.is_empty() {
        return raw;
    }
    match raw.find(build_dir_name) {
        Some(index) => &raw[index + build_dir_name.len()..],
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_trims_through_build_dir_name() {
        assert_eq!(
            normalize_path("/home/dev/llvm-build-1/MultiSource/app", "llvm-build-1"),
            "/MultiSource/app"
        );
    }

    #[test]
    fn test_normalize_path_uses_first_occurrence() {
        assert_eq!(normalize_path("/out/build/sub/build/app", "build"), "/sub/build/app");
    }

    #[test]
    fn test_normalize_path_without_build_dir_returns_input() {
        assert_eq!(normalize_path("/elsewhere/app", "build-2"), "/elsewhere/app");
    }

    #[test]
    fn test_normalize_path_archive_member_format() {
        let raw = "libstubs.c.o (ex /home/dev/suite-build-1/libstubs.a)";
        assert_eq!(normalize_path(raw, "suite-build-1"), "/libstubs.a)");
    }

    #[test]
    fn test_normalize_path_empty_build_dir_name_is_identity() {
        assert_eq!(normalize_path("/x/app", ""), "/x/app");
    }

    #[test]
    fn test_two_build_roots_normalize_to_same_key() {
        let before = normalize_path("/tmp/build-before/bin/app", "build-before");
        let after = normalize_path("/tmp/build-after/bin/app", "build-after");
        assert_eq!(before, after);
    }
}
