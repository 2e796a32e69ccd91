// src/heft/schedule.rs

use anyhow::anyhow;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::cost::Platform;
use crate::dag::graph::TaskGraph;
use crate::dag::interner::{ProcId, TaskId};
use crate::errors::Result;

/// Placement of one task. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleEntry {
    pub processor: ProcId,
    pub start_ms: f64,
    /// `start_ms + computation_cost(task, processor)`.
    pub end_ms: f64,
}

/// Working state of one scheduling invocation.
///
/// Holds at most one entry per task and, per processor, the time it becomes
/// free. Ready times only ever move forward.
#[derive(Debug, Clone)]
pub struct Schedule {
    entries: Vec<Option<ScheduleEntry>>,
    ready: Vec<f64>,
}

impl Schedule {
    pub fn new(tasks: usize, processors: usize) -> Self {
        Self {
            entries: vec![None; tasks],
            ready: vec![0.0; processors],
        }
    }

    pub fn entry(&self, task: TaskId) -> Option<&ScheduleEntry> {
        self.entries.get(task).and_then(Option::as_ref)
    }

    pub fn ready_time(&self, proc: ProcId) -> f64 {
        self.ready[proc]
    }

    /// Record a placement and advance the processor's ready time.
    pub(crate) fn record(&mut self, task: TaskId, entry: ScheduleEntry) {
        debug_assert!(self.entries[task].is_none(), "task placed twice");
        debug_assert!(entry.start_ms >= self.ready[entry.processor]);
        self.ready[entry.processor] = self.ready[entry.processor].max(entry.end_ms);
        self.entries[task] = Some(entry);
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(Option::is_some)
    }
}

/// Per-task record of the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskTiming {
    pub processor: String,
    pub start_time_ms: f64,
    pub end_time_ms: f64,
    pub duration_ms: f64,
}

/// The engine's output. Maps list tasks in declaration order.
///
/// ```json
/// {
///   "mapping": { "A": "GPU" },
///   "makespan_ms": 20.0,
///   "detailed_schedule": {
///     "A": { "processor": "GPU", "start_time_ms": 0.0, "end_time_ms": 20.0, "duration_ms": 20.0 }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub mapping: IndexMap<String, String>,
    pub makespan_ms: f64,
    pub detailed_schedule: IndexMap<String, TaskTiming>,
}

impl ScheduleResult {
    /// Distinct processors used, in order of first appearance.
    pub fn processors_used(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for proc in self.mapping.values() {
            if !seen.contains(&proc.as_str()) {
                seen.push(proc);
            }
        }
        seen
    }
}

/// Turn a finished schedule into the external result.
///
/// Fails if any task is missing an entry; a result is always complete.
pub fn aggregate(graph: &TaskGraph, platform: &Platform, schedule: &Schedule) -> Result<ScheduleResult> {
    let mut mapping = IndexMap::with_capacity(graph.len());
    let mut detailed_schedule = IndexMap::with_capacity(graph.len());
    let mut makespan_ms = 0.0_f64;

    for task in graph.task_ids() {
        let name = graph.task_name(task);
        let entry = schedule
            .entry(task)
            .ok_or_else(|| anyhow!("task '{name}' was never placed on a processor"))?;
        let processor = platform.processor_name(entry.processor).to_string();

        makespan_ms = makespan_ms.max(entry.end_ms);
        mapping.insert(name.to_string(), processor.clone());
        detailed_schedule.insert(
            name.to_string(),
            TaskTiming {
                processor,
                start_time_ms: entry.start_ms,
                end_time_ms: entry.end_ms,
                duration_ms: entry.end_ms - entry.start_ms,
            },
        );
    }

    Ok(ScheduleResult {
        mapping,
        makespan_ms,
        detailed_schedule,
    })
}
