// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `changegate`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "changegate",
    version,
    about = "Run pipeline steps gated on which paths a triggering event changed.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Changegate.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Changegate.toml")]
    pub config: String,

    /// Kind of triggering event.
    #[arg(long, value_enum, default_value_t = EventKindArg::Push)]
    pub event: EventKindArg,

    /// Branch the push went to. Required for push events.
    #[arg(long, value_name = "NAME")]
    pub branch: Option<String>,

    /// A path changed by the triggering event. Repeatable.
    #[arg(long = "changed", value_name = "PATH")]
    pub changed: Vec<String>,

    /// File with one changed path per line (blank lines ignored).
    ///
    /// Merged with any `--changed` paths.
    #[arg(long, value_name = "FILE")]
    pub changed_list: Option<String>,

    /// Evaluate filters and print the step plan, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CHANGEGATE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Event kind as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum EventKindArg {
    Push,
    PullRequest,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
