// src/heft/selector.rs

//! Greedy earliest-finish-time processor selection.

use tracing::{debug, trace};

use crate::cost::CostModel;
use crate::dag::graph::TaskGraph;
use crate::dag::interner::{ProcId, TaskId};
use crate::errors::{HeftError, Result};
use crate::heft::schedule::{Schedule, ScheduleEntry};

/// Best placement found for one task.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    processor: ProcId,
    est: f64,
    eft: f64,
}

/// Place every task of `order` on the processor giving it the earliest
/// finish time.
///
/// Placement is append-only: a task starts no earlier than its processor's
/// ready time, idle gaps earlier on the timeline are never back-filled.
/// Ties on EFT go to the processor declared first.
pub fn assign_processors(
    graph: &TaskGraph,
    costs: &CostModel,
    order: &[TaskId],
) -> Result<Schedule> {
    let mut schedule = Schedule::new(graph.len(), costs.processor_count());

    for &task in order {
        let mut best: Option<Candidate> = None;

        for proc in 0..costs.processor_count() {
            let data_ready = data_ready_time(graph, costs, &schedule, task, proc)?;
            let est = schedule.ready_time(proc).max(data_ready);
            let eft = est + costs.computation_cost(task, proc);
            trace!(
                task = %graph.task_name(task),
                processor = proc,
                data_ready,
                est,
                eft,
                "evaluated candidate processor"
            );

            if best.is_none_or(|b| eft < b.eft) {
                best = Some(Candidate {
                    processor: proc,
                    est,
                    eft,
                });
            }
        }

        let choice = best.ok_or_else(|| {
            HeftError::InvalidConfig(format!(
                "no processor available for task '{}'",
                graph.task_name(task)
            ))
        })?;
        if !choice.eft.is_finite() {
            return Err(HeftError::InvalidConfig(format!(
                "finish time of task '{}' is not finite",
                graph.task_name(task)
            )));
        }

        debug!(
            task = %graph.task_name(task),
            processor = choice.processor,
            start_ms = choice.est,
            end_ms = choice.eft,
            "assigned task"
        );
        schedule.record(
            task,
            ScheduleEntry {
                processor: choice.processor,
                start_ms: choice.est,
                end_ms: choice.eft,
            },
        );
    }

    Ok(schedule)
}

/// Time at which all already-placed predecessors' data is available on `proc`.
///
/// Predecessors without an entry yet are skipped.
fn data_ready_time(
    graph: &TaskGraph,
    costs: &CostModel,
    schedule: &Schedule,
    task: TaskId,
    proc: ProcId,
) -> Result<f64> {
    let mut ready = 0.0_f64;
    for &pred in graph.predecessors(task) {
        if let Some(entry) = schedule.entry(pred) {
            let comm = costs.communication_cost(pred, task, proc, Some(entry.processor))?;
            ready = ready.max(entry.end_ms + comm);
        }
    }
    Ok(ready)
}
