//! Binary classification of files found during the tree walk
//!
//! Files with a known archive/shared-object extension are admitted by name.
//! Everything else is probed with the `file` utility and admitted only when it
//! reports an ELF executable.

use regex::Regex;
use std::collections::HashSet;
use std::io;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use super::error::CollectError;
use crate::infra::CommandExecutor;

static VERSIONED_SHARED_OBJECT_RE: OnceLock<Regex> = OnceLock::new();

fn versioned_shared_object_re() -> &'static Regex {
    VERSIONED_SHARED_OBJECT_RE.get_or_init(|| {
        Regex::new(r"\.so(\.\d+)+$").expect("versioned shared object regex is valid")
    })
}

/// Decision taken from the file name alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameVerdict {
    /// Never scanned directly (object files are reported through their archives)
    Excluded,
    /// Known archive or shared-object suffix, admitted without probing
    KnownBinary,
    /// Needs the `file` probe
    Probe,
}

/// Final classification of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Candidate for size reporting
    Admitted,
    /// Not a size-reportable binary; carries the probe's description when there was one
    Rejected(String),
    /// The probe did not finish within the timeout
    TimedOut,
}

/// Decides which files are fed to the size tool
pub struct BinaryClassifier<'a, CE: CommandExecutor> {
    file_tool: &'a str,
    known_extensions: HashSet<String>,
    excluded_extensions: HashSet<String>,
    timeout: Option<Duration>,
    cmd_executor: &'a CE,
}

impl<'a, CE: CommandExecutor> BinaryClassifier<'a, CE> {
    /// Create a classifier; extensions are given without the leading dot
    pub fn new(
        file_tool: &'a str,
        known_extensions: &[String],
        excluded_extensions: &[String],
        timeout: Option<Duration>,
        cmd_executor: &'a CE,
    ) -> Self {
        Self {
            file_tool,
            known_extensions: normalize_extensions(known_extensions),
            excluded_extensions: normalize_extensions(excluded_extensions),
            timeout,
            cmd_executor,
        }
    }

    /// Classify by name only, without running anything
    pub fn verdict_for_name(&self, path: &Path) -> NameVerdict {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        if let Some(ref ext) = extension {
            if self.excluded_extensions.contains(ext) {
                return NameVerdict::Excluded;
            }
            if self.known_extensions.contains(ext) {
                return NameVerdict::KnownBinary;
            }
        }

        let is_versioned_so = self.known_extensions.contains("so")
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| versioned_shared_object_re().is_match(name));
        if is_versioned_so {
            return NameVerdict::KnownBinary;
        }

        NameVerdict::Probe
    }

    /// Classify `path`, probing with the file utility when the name is not conclusive
    ///
    /// Fails only when the probe cannot be started at all.
    pub fn classify(&self, path: &Path) -> Result<Classification, CollectError> {
        match self.verdict_for_name(path) {
            NameVerdict::Excluded => Ok(Classification::Rejected("excluded extension".to_string())),
            NameVerdict::KnownBinary => Ok(Classification::Admitted),
            NameVerdict::Probe => self.probe(path),
        }
    }

    fn probe(&self, path: &Path) -> Result<Classification, CollectError> {
        let output = match self.cmd_executor.execute(
            |cmd| cmd.arg("-b").arg(path),
            self.file_tool,
            self.timeout,
        ) {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                log::warn!("{}: {} timed out", path.display(), self.file_tool);
                return Ok(Classification::TimedOut);
            }
            Err(source) => {
                return Err(CollectError::ClassifierFailed {
                    tool: self.file_tool.to_string(),
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if !output.status.success() {
            log::debug!(
                "{}: {} exited with {:?}, excluding",
                path.display(),
                self.file_tool,
                output.status.code()
            );
            return Ok(Classification::Rejected("probe failed".to_string()));
        }

        let description = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if is_elf_executable(&description) {
            Ok(Classification::Admitted)
        } else {
            Ok(Classification::Rejected(description))
        }
    }
}

/// Whether a `file -b` description denotes an ELF executable
///
/// # Examples
///
/// ```
/// use codesize_diff::collector::is_elf_executable;
///
/// assert!(is_elf_executable("ELF 32-bit LSB executable, MIPS, version 1 (SYSV), statically linked"));
/// assert!(!is_elf_executable("ELF 64-bit LSB relocatable, x86-64"));
/// assert!(!is_elf_executable("Bourne-Again shell script, ASCII text executable"));
/// ```
pub fn is_elf_executable(description: &str) -> bool {
    description.contains("ELF") && description.contains("executable")
}

/// Canonical spelling of a configured extension: no leading dot, lowercase
///
/// ```
/// use codesize_diff::collector::classifier::normalize_extension;
///
/// assert_eq!(normalize_extension(".SO"), "so");
/// ```
pub fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}

fn normalize_extensions(extensions: &[String]) -> HashSet<String> {
    extensions.iter().map(|e| normalize_extension(e)).collect()
}
