// src/batch.rs

//! Batch sweep: every workload file in a directory, scheduled under each
//! interconnect preset, summarised side by side.
//!
//! Every (workload, preset) pair is an independent engine call, so they run
//! concurrently on tokio's blocking pool and share nothing.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::loader::{load_from_path, resolve_document, InterconnectOverrides};
use crate::errors::{HeftError, Result};
use crate::heft::{EngineOptions, Problem};
use crate::report::ScheduleSummary;

/// A named bandwidth/latency combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterconnectPreset {
    pub name: &'static str,
    pub bandwidth_mbps: f64,
    pub latency_ms: f64,
}

pub const PRESETS: [InterconnectPreset; 3] = [
    InterconnectPreset {
        name: "High-Speed",
        bandwidth_mbps: 2000.0,
        latency_ms: 1.0,
    },
    InterconnectPreset {
        name: "Medium",
        bandwidth_mbps: 1000.0,
        latency_ms: 2.0,
    },
    InterconnectPreset {
        name: "Low-Speed",
        bandwidth_mbps: 500.0,
        latency_ms: 5.0,
    },
];

impl InterconnectPreset {
    fn overrides(&self) -> InterconnectOverrides {
        InterconnectOverrides {
            bandwidth_mbps: Some(self.bandwidth_mbps),
            latency_ms: Some(self.latency_ms),
        }
    }
}

/// Outcome of one workload under one preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub workload: String,
    pub file: String,
    pub config: String,
    pub bandwidth_mbps: f64,
    pub latency_ms: f64,
    pub makespan_ms: f64,
    pub fps: Option<f64>,
    pub speedup: Option<f64>,
    pub mapping: IndexMap<String, String>,
}

/// Workload files (`*.json`, `*.toml`) directly inside `dir`, sorted by path.
///
/// Fails if the directory does not exist or holds no workload files.
pub fn find_workload_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(HeftError::InvalidConfig(format!(
            "directory '{}' not found",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_workload = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("toml"));
        if is_workload {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(HeftError::InvalidConfig(format!(
            "no workload files found in '{}'",
            dir.display()
        )));
    }
    Ok(files)
}

/// Schedule every workload in `dir` under every preset.
///
/// Unreadable files and failing (workload, preset) pairs are logged and
/// skipped. Records come back in (file, preset) order regardless of which
/// run finishes first.
pub async fn run_batch(
    dir: &Path,
    presets: &[InterconnectPreset],
    options: EngineOptions,
) -> Result<Vec<BatchRecord>> {
    let files = find_workload_files(dir)?;
    info!(dir = %dir.display(), files = files.len(), "starting batch sweep");

    let mut handles: Vec<(String, &'static str, JoinHandle<Result<BatchRecord>>)> = Vec::new();

    for path in &files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let document = match load_from_path(path) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(file = %file_name, error = %err, "could not load workload; skipping");
                continue;
            }
        };

        for preset in presets.iter().copied() {
            let problem_file = match resolve_document(document.clone(), preset.overrides()) {
                Ok(problem) => problem,
                Err(err) => {
                    warn!(file = %file_name, error = %err, "could not build problem; skipping");
                    break;
                }
            };
            let stem = path
                .file_stem()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let file = file_name.clone();

            let handle = tokio::task::spawn_blocking(move || -> Result<BatchRecord> {
                let problem = Problem::from_file(&problem_file)?;
                let result = problem.schedule(&options)?;
                let summary = ScheduleSummary::compute(&problem, &result);
                Ok(BatchRecord {
                    workload: problem.workload_id().map(str::to_string).unwrap_or(stem),
                    file,
                    config: preset.name.to_string(),
                    bandwidth_mbps: preset.bandwidth_mbps,
                    latency_ms: preset.latency_ms,
                    makespan_ms: result.makespan_ms,
                    fps: summary.throughput_ops,
                    speedup: summary.speedup,
                    mapping: result.mapping,
                })
            });
            handles.push((file_name.clone(), preset.name, handle));
        }
    }

    let mut records = Vec::with_capacity(handles.len());
    for (file, preset, handle) in handles {
        match handle.await {
            Ok(Ok(record)) => records.push(record),
            Ok(Err(err)) => {
                warn!(file = %file, preset, kind = err.kind(), error = %err, "scheduling failed; skipping");
            }
            Err(join_err) => {
                return Err(HeftError::Other(anyhow!(
                    "batch worker for '{file}' ({preset}) panicked: {join_err}"
                )));
            }
        }
    }

    info!(records = records.len(), "batch sweep complete");
    Ok(records)
}

/// Write all records as pretty JSON.
pub fn save_records(path: &Path, records: &[BatchRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    Ok(())
}

fn fmt_opt(value: Option<f64>, suffix: &str) -> String {
    value
        .map(|v| format!("{v:.2}{suffix}"))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Per-workload tables followed by a per-preset comparison.
pub fn render_batch(records: &[BatchRecord], presets: &[InterconnectPreset]) -> String {
    let mut out = String::new();
    let bar = "=".repeat(80);

    let mut by_file: IndexMap<&str, Vec<&BatchRecord>> = IndexMap::new();
    for record in records {
        by_file.entry(record.file.as_str()).or_default().push(record);
    }

    for (file, rows) in &by_file {
        let workload = rows.first().map(|r| r.workload.as_str()).unwrap_or(*file);
        let _ = writeln!(out, "\n{bar}\nWorkload: {workload}\n  File: {file}\n{bar}");
        let _ = writeln!(
            out,
            "{:<14} {:>12} {:>10} {:>14} {:>16} {:>9}",
            "Configuration", "Bandwidth", "Latency", "Makespan", "Throughput", "Speedup"
        );
        for r in rows {
            let _ = writeln!(
                out,
                "{:<14} {:>7} MB/s {:>7} ms {:>11.2} ms {:>16} {:>9}",
                r.config,
                r.bandwidth_mbps,
                r.latency_ms,
                r.makespan_ms,
                fmt_opt(r.fps, " ops/s"),
                fmt_opt(r.speedup, "x")
            );
        }
    }

    if !records.is_empty() {
        let _ = writeln!(out, "\n{bar}\nSUMMARY: ALL WORKLOADS COMPARISON\n{bar}");
        for preset in presets {
            let rows: Vec<&BatchRecord> =
                records.iter().filter(|r| r.config == preset.name).collect();
            if rows.is_empty() {
                continue;
            }
            let _ = writeln!(out, "\n{} Configuration:\n{}", preset.name, "-".repeat(80));
            let _ = writeln!(
                out,
                "{:<30} {:>14} {:>16} {:>9}",
                "Workload", "Makespan", "Throughput", "Speedup"
            );
            for r in rows {
                let name: String = r.workload.chars().take(30).collect();
                let _ = writeln!(
                    out,
                    "{:<30} {:>11.2} ms {:>16} {:>9}",
                    name,
                    r.makespan_ms,
                    fmt_opt(r.fps, " ops/s"),
                    fmt_opt(r.speedup, "x")
                );
            }
        }
    }

    out
}
