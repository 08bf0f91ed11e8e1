//! Size tool invocation

use std::io;
use std::path::Path;
use std::time::Duration;

use super::dataset::SkipReason;
use super::error::CollectError;
use super::parser::{parse_size_output, SizeOutcome};
use crate::infra::CommandExecutor;

/// Exit code binutils `size` uses for "file format not recognized"
pub const UNSUPPORTED_FORMAT_EXIT_CODE: i32 = 3;

/// Runs the external size tool on one file at a time
pub struct SizeTool<'a, CE: CommandExecutor> {
    program: &'a str,
    args: &'a [String],
    timeout: Option<Duration>,
    cmd_executor: &'a CE,
}

impl<'a, CE: CommandExecutor> SizeTool<'a, CE> {
    /// Create a size tool runner; `args` are passed before the file path
    pub fn new(
        program: &'a str,
        args: &'a [String],
        timeout: Option<Duration>,
        cmd_executor: &'a CE,
    ) -> Self {
        Self {
            program,
            args,
            timeout,
            cmd_executor,
        }
    }

    /// Measure `path`, normalizing the reported filename against `build_dir_name`
    ///
    /// Only a failure to start the tool is an error; every other problem is a
    /// [`SizeOutcome::Skip`].
    pub fn measure(&self, path: &Path, build_dir_name: &str) -> Result<SizeOutcome, CollectError> {
        let output = match self.cmd_executor.execute(
            |cmd| cmd.args(self.args).arg(path),
            self.program,
            self.timeout,
        ) {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                log::warn!("{}: {} timed out", path.display(), self.program);
                return Ok(SizeOutcome::Skip(SkipReason::TimedOut));
            }
            Err(source) => {
                return Err(CollectError::SizeToolFailed {
                    tool: self.program.to_string(),
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        match output.status.code() {
            Some(0) => {}
            Some(UNSUPPORTED_FORMAT_EXIT_CODE) => {
                log::debug!("{}: unsupported format, skipping", path.display());
                return Ok(SizeOutcome::Skip(SkipReason::UnsupportedFormat));
            }
            code => {
                log::warn!(
                    "{}: {} failed with status {}: {}",
                    path.display(),
                    self.program,
                    code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                return Ok(SizeOutcome::Skip(SkipReason::ToolFailed { code }));
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match parse_size_output(&stdout, build_dir_name) {
            Ok(record) => Ok(SizeOutcome::Record(record)),
            Err(reason) => {
                log::warn!("{}: {}", path.display(), reason);
                Ok(SizeOutcome::Skip(reason))
            }
        }
    }
}
