//! Infrastructure traits for abstracting I/O operations.
//!
//! This module provides trait abstractions for filesystem and command execution operations,
//! so the collector and config layers can be exercised without real binaries or tools.

use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Poll interval while waiting on a child process with a deadline.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Trait for abstracting filesystem operations.
pub trait FileSystem {
    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a slice of bytes to a file.
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()>;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// Trait for abstracting command execution.
///
/// Implementations must be `Sync` to be shared by the parallel collector.
pub trait CommandExecutor {
    /// Execute a command and return its output (stdout, stderr, status).
    fn output(&self, cmd: &mut Command) -> io::Result<Output>;

    /// Execute a command, killing it if it runs longer than `timeout`.
    ///
    /// A timed out command yields an error of kind [`io::ErrorKind::TimedOut`].
    /// The default implementation ignores the timeout.
    fn output_with_timeout(
        &self,
        cmd: &mut Command,
        _timeout: Option<Duration>,
    ) -> io::Result<Output> {
        self.output(cmd)
    }

    /// Execute a command built with a closure and return its output.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use codesize_diff::infra::{CommandExecutor, RealCommandExecutor};
    /// use std::time::Duration;
    ///
    /// let executor = RealCommandExecutor;
    /// let output = executor.execute(
    ///     |cmd| cmd.arg("-b").arg("/bin/ls"),
    ///     "file",
    ///     Some(Duration::from_secs(10)),
    /// )?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    fn execute<F, P>(&self, builder: F, program: P, timeout: Option<Duration>) -> io::Result<Output>
    where
        F: FnOnce(&mut Command) -> &mut Command,
        P: AsRef<OsStr>,
    {
        let mut cmd = Command::new(program);
        builder(&mut cmd);
        self.output_with_timeout(&mut cmd, timeout)
    }
}

/// Real command executor that delegates to std::process::Command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealCommandExecutor;

impl CommandExecutor for RealCommandExecutor {
    fn output(&self, cmd: &mut Command) -> io::Result<Output> {
        cmd.output()
    }

    fn output_with_timeout(
        &self,
        cmd: &mut Command,
        timeout: Option<Duration>,
    ) -> io::Result<Output> {
        let Some(timeout) = timeout else {
            return cmd.output();
        };

        let mut child = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Drain both pipes on their own threads so a chatty child cannot block on a full pipe.
        let stdout_reader = spawn_pipe_reader(child.stdout.take());
        let stderr_reader = spawn_pipe_reader(child.stderr.take());

        let status = match wait_with_deadline(&mut child, timeout)? {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("command did not finish within {}s", timeout.as_secs_f64()),
                ));
            }
        };

        Ok(Output {
            status,
            stdout: join_pipe_reader(stdout_reader),
            stderr: join_pipe_reader(stderr_reader),
        })
    }
}

fn spawn_pipe_reader<R>(pipe: Option<R>) -> Option<thread::JoinHandle<Vec<u8>>>
where
    R: Read + Send + 'static,
{
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn join_pipe_reader(reader: Option<thread::JoinHandle<Vec<u8>>>) -> Vec<u8> {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

fn wait_with_deadline(
    child: &mut Child,
    timeout: Duration,
) -> io::Result<Option<std::process::ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(WAIT_POLL_INTERVAL);
    }
}

/// Create an ExitStatus with the given exit code for use in test mocks.
///
/// This avoids spawning actual processes (like `Command::new("true")`) in tests.
#[cfg(all(test, unix))]
pub fn mock_exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code << 8) // Unix stores exit code in upper bits
}

#[cfg(all(test, windows))]
pub fn mock_exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code as u32)
}

/// Build a fake [`Output`] for test mocks.
#[cfg(test)]
pub fn mock_output(code: i32, stdout: &str) -> Output {
    Output {
        status: mock_exit_status(code),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}
