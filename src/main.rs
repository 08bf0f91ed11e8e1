use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use codesize_diff::cmd::{self, CompareOptions, ToolOptions};
use std::path::PathBuf;
use std::process;

/// Compare the code size of two build trees
///
/// codesize-diff runs `file` and a Berkeley-format `size` tool over every
/// binary in two build output directories, matches files by their path inside
/// the build directory and ranks the biggest relative savings and regressions.
#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two build trees
    Compare {
        /// First (baseline) build directory
        before: PathBuf,

        /// Second build directory
        after: PathBuf,

        #[command(flatten)]
        tools: ToolArgs,

        /// Number of entries in the top savings and regressions lists
        #[arg(long, value_name = "N")]
        top: Option<usize>,

        /// Draw a before/after bar chart of the ranked files
        #[arg(long)]
        chart: bool,

        /// Output as JSON
        #[arg(long, conflicts_with = "chart")]
        json: bool,
    },

    /// Collect and list the size records of a single build tree
    Scan {
        /// Build directory
        dir: PathBuf,

        #[command(flatten)]
        tools: ToolArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct ToolArgs {
    /// Size tool to run on every binary (default: size)
    #[arg(value_name = "SIZE_TOOL")]
    size_tool: Option<String>,

    /// Arguments for the size tool; a leading '-' is added to bare words
    /// unless they follow -o
    #[arg(value_name = "SIZE_ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    size_args: Vec<String>,

    /// File classification tool (default: file)
    #[arg(long, value_name = "PATH")]
    file_tool: Option<String>,

    /// Kill a tool invocation after this many seconds (0 disables)
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Worker threads for collection
    #[arg(long, short, value_name = "N")]
    jobs: Option<usize>,

    /// Configuration file (default: ./.codesize-diff.toml if present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl ToolArgs {
    fn into_options(self, top: Option<usize>) -> ToolOptions {
        ToolOptions {
            size_tool: self.size_tool,
            size_args: self.size_args,
            file_tool: self.file_tool,
            top,
            timeout: self.timeout,
            jobs: self.jobs,
            config: self.config,
        }
    }
}

fn main() {
    // Warnings for skipped files are shown unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match cli.command {
        Commands::Compare {
            before,
            after,
            tools,
            top,
            chart,
            json,
        } => cmd::cmd_compare(&CompareOptions {
            before,
            after,
            tools: tools.into_options(top),
            chart,
            json,
        }),
        Commands::Scan { dir, tools, json } => cmd::cmd_scan(&dir, &tools.into_options(None), json),
        Commands::Completions { shell } => {
            cmd::cmd_completions(shell, &mut Cli::command(), &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        use codesize_diff::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert()
    }

    #[test]
    fn test_about_comes_from_doc_comment() {
        let about = Cli::command().get_about().map(|a| a.to_string());
        assert_eq!(about.as_deref(), Some("Compare the code size of two build trees"));
    }

    #[test]
    fn test_compare_collects_size_args_after_tool() {
        let cli = Cli::try_parse_from([
            "codesize-diff",
            "compare",
            "--top",
            "5",
            "build-a",
            "build-b",
            "llvm-size",
            "A",
            "-t",
        ])
        .unwrap();

        match cli.command {
            Commands::Compare { tools, top, .. } => {
                assert_eq!(top, Some(5));
                assert_eq!(tools.size_tool.as_deref(), Some("llvm-size"));
                assert_eq!(tools.size_args, vec!["A", "-t"]);
            }
            _ => panic!("expected compare"),
        }
    }

    #[test]
    fn test_json_conflicts_with_chart() {
        let result = Cli::try_parse_from(["codesize-diff", "compare", "--json", "--chart", "a", "b"]);
        assert!(result.is_err());
    }
}
