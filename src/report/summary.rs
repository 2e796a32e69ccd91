// src/report/summary.rs

use serde::Serialize;

use crate::heft::{Problem, ScheduleResult};

/// Busy time of one processor over the schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessorUsage {
    pub processor: String,
    pub busy_ms: f64,
    /// `busy / makespan * 100`; `None` for a zero makespan.
    pub utilization_pct: Option<f64>,
}

/// Time to run every task back-to-back on the single best processor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleProcessorBaseline {
    pub processor: String,
    pub total_ms: f64,
}

/// Derived metrics for a finished schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub makespan_ms: f64,
    /// Operations per second if the whole graph is one operation.
    pub throughput_ops: Option<f64>,
    /// One entry per declared processor, in declaration order.
    pub utilization: Vec<ProcessorUsage>,
    pub best_single_processor: Option<SingleProcessorBaseline>,
    /// `best single-processor time / makespan`.
    pub speedup: Option<f64>,
    /// Sum of all task durations.
    pub total_compute_ms: f64,
    /// `makespan - total compute`, only when positive.
    pub communication_overhead_ms: Option<f64>,
}

impl ScheduleSummary {
    pub fn compute(problem: &Problem, result: &ScheduleResult) -> Self {
        let platform = problem.platform();
        let graph = problem.graph();
        let costs = problem.costs();
        let makespan = result.makespan_ms;
        let ratio = |value: f64| (makespan > 0.0).then(|| value / makespan);

        let utilization = platform
            .processor_ids()
            .map(|proc| {
                let name = platform.processor_name(proc);
                let busy_ms: f64 = result
                    .detailed_schedule
                    .values()
                    .filter(|timing| timing.processor == name)
                    .map(|timing| timing.duration_ms)
                    .sum();
                ProcessorUsage {
                    processor: name.to_string(),
                    busy_ms,
                    utilization_pct: ratio(busy_ms).map(|r| r * 100.0),
                }
            })
            .collect();

        let mut best_single_processor: Option<SingleProcessorBaseline> = None;
        for proc in platform.processor_ids() {
            let total_ms: f64 = graph
                .task_ids()
                .map(|task| costs.computation_cost(task, proc))
                .sum();
            if best_single_processor
                .as_ref()
                .is_none_or(|best| total_ms < best.total_ms)
            {
                best_single_processor = Some(SingleProcessorBaseline {
                    processor: platform.processor_name(proc).to_string(),
                    total_ms,
                });
            }
        }

        let total_compute_ms: f64 = result
            .detailed_schedule
            .values()
            .map(|timing| timing.duration_ms)
            .sum();
        let overhead = makespan - total_compute_ms;

        Self {
            makespan_ms: makespan,
            throughput_ops: ratio(1000.0),
            utilization,
            speedup: best_single_processor
                .as_ref()
                .and_then(|best| ratio(best.total_ms)),
            best_single_processor,
            total_compute_ms,
            communication_overhead_ms: (overhead > 0.0).then_some(overhead),
        }
    }
}
