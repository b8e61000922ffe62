// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `schedag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "schedag",
    version,
    about = "Compute a multiprocessor schedule for a weighted task graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the graph description (DOT-like digraph syntax).
    #[arg(value_name = "GRAPH")]
    pub graph: String,

    /// Number of identical processors to schedule onto.
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub processors: usize,

    /// Emit the schedule as JSON instead of the text rendering.
    #[arg(long)]
    pub json: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SCHEDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse and resolve the graph, print a summary, but don't schedule.
    #[arg(long)]
    pub dry_run: bool,
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
