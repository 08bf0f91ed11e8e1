//! Common test utilities and helpers
//!
//! Integration tests drive the real binary against build trees made of small
//! text fixtures, with shell scripts standing in for `file` and `size`.
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures::Workspace;
//!
//! let workspace = Workspace::new()?;
//! workspace.tree("build-1")?.executable("bin/app", 1000, 0, 0)?;
//! ```

pub mod fixtures;

use assert_cmd::Command;
use fixtures::Workspace;

/// The codesize-diff binary, run from inside `workspace`
#[allow(dead_code)]
pub fn bin_in(workspace: &Workspace) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_codesize-diff"));
    cmd.current_dir(workspace.path()).env_remove("RUST_LOG");
    cmd
}

/// `compare` with the fake tools wired in; positional args are appended by the caller
#[allow(dead_code)]
pub fn compare_cmd(workspace: &Workspace, extra_flags: &[&str]) -> Command {
    let mut cmd = bin_in(workspace);
    cmd.arg("compare")
        .arg("--file-tool")
        .arg(workspace.file_tool())
        .args(extra_flags);
    cmd
}
