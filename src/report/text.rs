// src/report/text.rs

//! Plain-text rendering of workloads and schedules.
//!
//! All functions return a `String`; callers decide where it goes.

use std::fmt::Write;

use crate::config::model::{ProblemFile, WorkloadSpec};
use crate::heft::{Problem, ScheduleResult};
use crate::report::summary::ScheduleSummary;

const RULE_WIDTH: usize = 80;

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
}

fn rule(out: &mut String) {
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
}

/// Workload summary: tasks, their costs and the dependencies.
pub fn render_workload(problem: &ProblemFile) -> String {
    let workload: &WorkloadSpec = &problem.workload;
    let mut out = String::new();

    heading(&mut out, "WORKLOAD SUMMARY");
    let _ = writeln!(
        out,
        "\nWorkload ID: {}",
        workload.workload_id.as_deref().unwrap_or("Unknown")
    );
    let _ = writeln!(out, "Number of Tasks: {}", workload.nodes.len());
    let _ = writeln!(out, "Number of Dependencies: {}", workload.edges.len());
    let processors: Vec<&str> = problem
        .system_config
        .processors
        .keys()
        .map(String::as_str)
        .collect();
    let _ = writeln!(out, "Processor Types: {}", processors.join(", "));

    let _ = writeln!(out, "\nTasks:");
    rule(&mut out);
    for node in &workload.nodes {
        let _ = writeln!(out, "\n  {}", node.id.as_deref().unwrap_or("<missing id>"));
        if let Some(desc) = node.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "    Description: {desc}");
        }
        if let Some(costs) = &node.costs {
            let parts: Vec<String> = costs
                .iter()
                .map(|(proc, cost)| format!("{proc}={cost}ms"))
                .collect();
            let _ = writeln!(out, "    Costs: {}", parts.join(", "));
        }
        if let Some(intensity) = node.workload_intensity_gflops {
            let _ = writeln!(out, "    Intensity: {intensity} GFLOPS");
        }
    }

    if !workload.edges.is_empty() {
        let _ = writeln!(out, "\nDependencies:");
        rule(&mut out);
        for edge in &workload.edges {
            let _ = write!(
                out,
                "  {} -> {}: {:.2} MB",
                edge.from.as_deref().unwrap_or("?"),
                edge.to.as_deref().unwrap_or("?"),
                edge.data_size_mb
            );
            if let Some(name) = edge.name.as_deref().filter(|n| !n.is_empty()) {
                let _ = write!(out, " ({name})");
            }
            let _ = writeln!(out);
        }
    }

    out
}

/// Results table plus utilisation, baseline comparison and overhead.
pub fn render_results(problem: &Problem, result: &ScheduleResult) -> String {
    let summary = ScheduleSummary::compute(problem, result);
    let interconnect = problem.platform().interconnect();
    let mut out = String::new();

    heading(&mut out, "SCHEDULING RESULTS");
    let _ = writeln!(out, "\nSystem Configuration:");
    let _ = writeln!(out, "  Bandwidth: {} MB/s", interconnect.bandwidth_mbps);
    let _ = writeln!(out, "  Latency: {} ms", interconnect.latency_ms);

    let _ = writeln!(out, "\nTotal Makespan: {:.2} ms", summary.makespan_ms);
    if let Some(fps) = summary.throughput_ops {
        let _ = writeln!(out, "Throughput: {fps:.2} operations/second");
    }

    let _ = writeln!(out, "\nTask-to-Processor Mapping:");
    rule(&mut out);
    let _ = writeln!(
        out,
        "{:<20} {:<12} {:<12} {:<12} {}",
        "Task", "Processor", "Start (ms)", "End (ms)", "Duration (ms)"
    );
    rule(&mut out);
    for (task, timing) in &result.detailed_schedule {
        let _ = writeln!(
            out,
            "{:<20} {:<12} {:>10.2}  {:>10.2}  {:>10.2}",
            task, timing.processor, timing.start_time_ms, timing.end_time_ms, timing.duration_ms
        );
    }

    let _ = writeln!(out, "\nProcessor Utilization:");
    rule(&mut out);
    for usage in &summary.utilization {
        match usage.utilization_pct {
            Some(pct) => {
                let _ = writeln!(
                    out,
                    "  {}: {:5.1}% ({:.2} ms / {:.2} ms)",
                    usage.processor, pct, usage.busy_ms, summary.makespan_ms
                );
            }
            None => {
                let _ = writeln!(out, "  {}: n/a ({:.2} ms)", usage.processor, usage.busy_ms);
            }
        }
    }

    if let Some(best) = &summary.best_single_processor {
        let _ = writeln!(out, "\nPerformance Comparison:");
        rule(&mut out);
        let _ = writeln!(
            out,
            "  Best Single-Processor: {:.2} ms ({})",
            best.total_ms, best.processor
        );
        let _ = writeln!(out, "  Multi-Processor (HEFT): {:.2} ms", summary.makespan_ms);
        if let Some(speedup) = summary.speedup {
            let _ = writeln!(out, "  Speedup: {speedup:.2}x");
        }
    }

    if let Some(overhead) = summary.communication_overhead_ms {
        let _ = writeln!(out, "\nCommunication Overhead:");
        rule(&mut out);
        let _ = writeln!(
            out,
            "  Overhead: {:.2} ms ({:.1}% of total time)",
            overhead,
            overhead / summary.makespan_ms * 100.0
        );
    }

    out
}

/// One-line-per-field summary used by `--quiet`.
pub fn render_quiet(result: &ScheduleResult) -> String {
    let mapping: Vec<String> = result
        .mapping
        .iter()
        .map(|(task, proc)| format!("{task}: {proc}"))
        .collect();
    format!(
        "Makespan: {:.2} ms\nMapping: {{{}}}\n",
        result.makespan_ms,
        mapping.join(", ")
    )
}
