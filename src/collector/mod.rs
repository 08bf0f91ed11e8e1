//! Code-size dataset collection
//!
//! Walks a build tree, classifies every regular file, runs the size tool on the
//! admitted ones and gathers the parsed records into a [`Dataset`].
//!
//! # Examples
//!
//! ```no_run
//! use codesize_diff::collector::{CollectorConfig, DatasetCollector};
//! use std::path::Path;
//!
//! let collector = DatasetCollector::new(CollectorConfig::default());
//! let dataset = collector.collect(Path::new("build-before"))?;
//!
//! println!("{} binaries, {} bytes", dataset.len(), dataset.total_bytes());
//! for skipped in dataset.skipped() {
//!     println!("skipped {}: {}", skipped.path.display(), skipped.reason);
//! }
//! # Ok::<(), codesize_diff::collector::CollectError>(())
//! ```

pub mod classifier;
pub mod dataset;
pub mod error;
pub mod executor;
pub mod parser;
pub mod path;

pub use classifier::{is_elf_executable, BinaryClassifier, Classification, NameVerdict};
pub use dataset::{Dataset, SizeRecord, SkipReason, SkippedFile};
pub use error::CollectError;
pub use executor::{SizeTool, UNSUPPORTED_FORMAT_EXIT_CODE};
pub use parser::{parse_size_output, SizeOutcome};
pub use path::normalize_path;

use crate::infra::{CommandExecutor, RealCommandExecutor};
use rayon::prelude::*;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

/// Settings for one collection run
#[derive(Debug, Clone, PartialEq)]
pub struct CollectorConfig {
    /// Size-reporting program (default: `size`)
    pub size_tool: String,
    /// Flags passed to the size tool before the file path
    pub size_args: Vec<String>,
    /// File classification program (default: `file`)
    pub file_tool: String,
    /// Extensions admitted without probing (default: `a`, `so`)
    pub known_extensions: Vec<String>,
    /// Extensions never scanned directly (default: `o`)
    pub excluded_extensions: Vec<String>,
    /// Per-subprocess timeout; `None` waits forever
    pub timeout: Option<Duration>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            size_tool: "size".to_string(),
            size_args: Vec::new(),
            file_tool: "file".to_string(),
            known_extensions: vec!["a".to_string(), "so".to_string()],
            excluded_extensions: vec!["o".to_string()],
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

/// Collects size datasets from build trees
pub struct DatasetCollector<CE: CommandExecutor = RealCommandExecutor> {
    config: CollectorConfig,
    cmd_executor: CE,
}

impl DatasetCollector {
    /// Create a collector that runs the real tools
    pub fn new(config: CollectorConfig) -> Self {
        Self::with_executor(config, RealCommandExecutor)
    }
}

impl<CE: CommandExecutor + Sync> DatasetCollector<CE> {
    /// Create a collector with a custom command executor
    pub fn with_executor(config: CollectorConfig, cmd_executor: CE) -> Self {
        Self {
            config,
            cmd_executor,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Collect both trees of a comparison concurrently
    pub fn collect_pair(
        &self,
        before: &Path,
        after: &Path,
    ) -> Result<(Dataset, Dataset), CollectError> {
        let (before, after) = rayon::join(|| self.collect(before), || self.collect(after));
        Ok((before?, after?))
    }

    /// Collect one build tree
    ///
    /// Records and skip entries follow discovery order (walk sorted by file
    /// name) regardless of how the per-file work is scheduled.
    pub fn collect(&self, build_root: &Path) -> Result<Dataset, CollectError> {
        let root = resolve_root(build_root)?;

        let mut dataset = Dataset::new(&root);
        let candidates = self.discover(&root, &mut dataset);
        log::info!(
            "{}: {} candidate files",
            root.display(),
            candidates.len()
        );

        let classifier = self.classifier();
        let size_tool = SizeTool::new(
            &self.config.size_tool,
            &self.config.size_args,
            self.config.timeout,
            &self.cmd_executor,
        );
        let build_dir_name = dataset.build_dir_name().to_string();

        let outcomes: Vec<Option<SizeOutcome>> = candidates
            .par_iter()
            .map(|path| match classifier.classify(path)? {
                Classification::Admitted => size_tool.measure(path, &build_dir_name).map(Some),
                Classification::TimedOut => Ok(Some(SizeOutcome::Skip(SkipReason::TimedOut))),
                Classification::Rejected(description) => {
                    log::debug!("{}: not a binary ({})", path.display(), description);
                    Ok(None)
                }
            })
            .collect::<Result<_, CollectError>>()?;

        for (path, outcome) in candidates.into_iter().zip(outcomes) {
            match outcome {
                Some(SizeOutcome::Record(record)) => {
                    dataset.insert(record);
                }
                Some(SizeOutcome::Skip(reason)) => dataset.skip(path, reason),
                None => {}
            }
        }

        log::info!(
            "{}: {} records, {} skipped",
            root.display(),
            dataset.len(),
            dataset.skipped().len()
        );
        Ok(dataset)
    }

    fn classifier(&self) -> BinaryClassifier<'_, CE> {
        BinaryClassifier::new(
            &self.config.file_tool,
            &self.config.known_extensions,
            &self.config.excluded_extensions,
            self.config.timeout,
            &self.cmd_executor,
        )
    }

    /// Walk the tree without following symlinks and list regular files that are not excluded by name
    fn discover(&self, root: &Path, dataset: &mut Dataset) -> Vec<PathBuf> {
        let classifier = self.classifier();

        let mut candidates = Vec::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    log::warn!("{}: {}", path.display(), e);
                    dataset.skip(
                        path,
                        SkipReason::Unreadable {
                            detail: e.to_string(),
                        },
                    );
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            if classifier.verdict_for_name(entry.path()) == NameVerdict::Excluded {
                continue;
            }
            candidates.push(entry.into_path());
        }
        candidates
    }
}

/// Absolute form of `build_root` with `.` and `..` folded away
///
/// The base name of the result is what filenames are normalized against, so a
/// root without one (`/`) is rejected along with missing directories.
fn resolve_root(build_root: &Path) -> Result<PathBuf, CollectError> {
    let not_found = || CollectError::BuildRootNotFound(build_root.to_path_buf());
    let absolute = std::path::absolute(build_root).map_err(|_| not_found())?;

    let mut root = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                root.pop();
            }
            other => root.push(other),
        }
    }

    if root.file_name().is_none() || !root.is_dir() {
        return Err(not_found());
    }
    Ok(root)
}
