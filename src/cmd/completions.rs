//! Completions command implementation
//!
//! Handles the `codesize-diff completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts
///
/// Writes the completion script for `shell` to `out`. The caller passes its
/// own clap `Command` since the CLI definition lives in the binary.
///
/// # Examples
///
/// ```bash
/// # Bash
/// codesize-diff completions bash > /etc/bash_completion.d/codesize-diff
///
/// # Zsh
/// codesize-diff completions zsh > ~/.zfunc/_codesize-diff
///
/// # Fish
/// codesize-diff completions fish > ~/.config/fish/completions/codesize-diff.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}
