// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `heftmap`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "heftmap",
    version,
    about = "Map a task DAG onto heterogeneous processors with HEFT.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `HEFTMAP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Schedule a single workload file and print the report.
    Schedule(ScheduleArgs),
    /// Schedule every workload in a directory under the bandwidth/latency presets.
    Batch(BatchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ScheduleArgs {
    /// Path to the workload document (JSON, or TOML by extension).
    #[arg(value_name = "WORKLOAD")]
    pub workload: PathBuf,

    /// Inter-processor bandwidth in MB/s.
    ///
    /// Overrides the document's value; bare workloads default to 1000.
    #[arg(short, long, value_name = "MBPS")]
    pub bandwidth: Option<f64>,

    /// Inter-processor latency in ms.
    ///
    /// Overrides the document's value; bare workloads default to 2.
    #[arg(short, long, value_name = "MS")]
    pub latency: Option<f64>,

    /// Save the result as JSON to this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Only print makespan and mapping.
    #[arg(short, long)]
    pub quiet: bool,

    /// Never place a task before all of its predecessors.
    #[arg(long)]
    pub strict_deps: bool,
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// Directory containing workload files.
    #[arg(value_name = "DIR", default_value = "workloads")]
    pub directory: PathBuf,

    /// Where to save all batch records as JSON.
    #[arg(short, long, value_name = "PATH", default_value = "batch_test_results.json")]
    pub output: PathBuf,

    /// Never place a task before all of its predecessors.
    #[arg(long)]
    pub strict_deps: bool,
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
