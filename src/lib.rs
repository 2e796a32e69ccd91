// src/lib.rs

pub mod batch;
pub mod cli;
pub mod config;
pub mod cost;
pub mod dag;
pub mod errors;
pub mod heft;
pub mod logging;
pub mod report;

use std::fs;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::batch::{render_batch, run_batch, save_records, PRESETS};
use crate::cli::{BatchArgs, CliArgs, Command, ScheduleArgs};
use crate::config::loader::{load_problem, InterconnectOverrides};
use crate::heft::{EngineOptions, OrderingPolicy, Problem};

pub use crate::errors::HeftError;
pub use crate::heft::{optimize, optimize_with, ScheduleResult};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - workload loading (+ CLI interconnect overrides)
/// - the HEFT engine
/// - report rendering and optional JSON output
/// - the batch sweep
pub async fn run(args: CliArgs) -> Result<()> {
    match args.command {
        Command::Schedule(schedule) => run_schedule(schedule),
        Command::Batch(batch) => run_batch_command(batch).await,
    }
}

fn engine_options(strict_deps: bool) -> EngineOptions {
    EngineOptions {
        ordering: if strict_deps {
            OrderingPolicy::DependencyRespecting
        } else {
            OrderingPolicy::RankOnly
        },
    }
}

fn run_schedule(args: ScheduleArgs) -> Result<()> {
    let overrides = InterconnectOverrides {
        bandwidth_mbps: args.bandwidth,
        latency_ms: args.latency,
    };
    let problem_file = load_problem(&args.workload, overrides)
        .with_context(|| format!("loading workload from {:?}", args.workload))?;

    if !args.quiet {
        print!("{}", report::render_workload(&problem_file));
        println!("\n{}\nRUNNING HEFT SCHEDULER...\n{}", "=".repeat(80), "=".repeat(80));
    }

    let problem = Problem::from_file(&problem_file)?;
    let result = problem.schedule(&engine_options(args.strict_deps))?;

    if args.quiet {
        print!("{}", report::render_quiet(&result));
    } else {
        print!("{}", report::render_results(&problem, &result));
        println!("{}\n", "=".repeat(80));
    }

    if let Some(output) = &args.output {
        let json = serde_json::to_string_pretty(&result)?;
        fs::write(output, json).with_context(|| format!("writing results to {:?}", output))?;
        println!("\nResults saved to: {}", output.display());
    }

    debug!("schedule command complete");
    Ok(())
}

async fn run_batch_command(args: BatchArgs) -> Result<()> {
    println!("{}\nBATCH WORKLOAD TESTING\n{}", "=".repeat(80), "=".repeat(80));
    println!("\nScanning directory: {}", args.directory.display());

    let records = run_batch(&args.directory, &PRESETS, engine_options(args.strict_deps)).await?;
    print!("{}", render_batch(&records, &PRESETS));

    if !records.is_empty() {
        save_records(&args.output, &records)?;
        println!("\nDetailed results saved to: {}", args.output.display());
    }

    info!(records = records.len(), "batch command complete");
    Ok(())
}
