// src/cost/model.rs

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::config::model::{NodeSpec, WorkloadSpec};
use crate::cost::platform::{Interconnect, Platform};
use crate::dag::graph::TaskGraph;
use crate::dag::interner::{ProcId, TaskId};
use crate::errors::{HeftError, Result};

/// How a task declared its cost, before resolution.
#[derive(Debug, Clone, Copy)]
enum CostSpec<'a> {
    /// Compute demand divided by each processor's performance rating.
    Intensity(f64),
    /// Explicit milliseconds per processor.
    Table(&'a indexmap::IndexMap<String, f64>),
}

impl<'a> CostSpec<'a> {
    fn of(node: &'a NodeSpec, task: &str) -> Result<Self> {
        match (node.workload_intensity_gflops, node.costs.as_ref()) {
            (Some(intensity), None) => Ok(CostSpec::Intensity(intensity)),
            (None, Some(table)) => Ok(CostSpec::Table(table)),
            (Some(_), Some(_)) => Err(HeftError::incomplete_cost(
                task,
                "declares both 'workload_intensity_GFLOPS' and 'costs'; exactly one is allowed",
            )),
            (None, None) => Err(HeftError::incomplete_cost(
                task,
                "declares neither 'workload_intensity_GFLOPS' nor 'costs'",
            )),
        }
    }
}

/// Computation and communication costs for one problem.
///
/// Both cost representations are resolved at construction into one dense
/// `tasks x processors` table, so lookups never branch on representation.
#[derive(Debug, Clone)]
pub struct CostModel {
    /// Milliseconds, row-major by task: `computation[task * procs + proc]`.
    computation: Vec<f64>,
    procs: usize,
    /// Data volume (MB) per `(parent, child)` edge.
    transfers: FxHashMap<(TaskId, TaskId), f64>,
    interconnect: Interconnect,
    /// Task names by id, for error reporting.
    task_names: Vec<String>,
}

impl CostModel {
    /// Resolve every task's cost on every declared processor.
    ///
    /// `graph` must have been built from the same `workload`, so node
    /// positions line up with [`TaskId`]s.
    pub fn resolve(workload: &WorkloadSpec, graph: &TaskGraph, platform: &Platform) -> Result<Self> {
        let procs = platform.len();
        if procs == 0 {
            return Err(HeftError::InvalidConfig(
                "cannot resolve costs without any processor".to_string(),
            ));
        }

        let mut computation = Vec::with_capacity(graph.len() * procs);
        for (task, node) in graph.task_ids().zip(workload.nodes.iter()) {
            let name = graph.task_name(task);
            match CostSpec::of(node, name)? {
                CostSpec::Intensity(intensity) => {
                    if !intensity.is_finite() || intensity < 0.0 {
                        return Err(HeftError::incomplete_cost(
                            name,
                            format!("workload intensity must be finite and >= 0 (got {intensity})"),
                        ));
                    }
                    for proc in platform.processor_ids() {
                        let rating = platform.performance(proc);
                        if !rating.is_finite() || rating <= 0.0 {
                            return Err(HeftError::InvalidConfig(format!(
                                "processor '{}' must have performance_GFLOPS > 0 to run \
                                 intensity-based task '{name}' (got {rating})",
                                platform.processor_name(proc)
                            )));
                        }
                        let cost = intensity / rating * 1000.0;
                        if !cost.is_finite() {
                            return Err(HeftError::incomplete_cost(
                                name,
                                format!(
                                    "cost on processor '{}' is not finite \
                                     ({intensity} / {rating} * 1000)",
                                    platform.processor_name(proc)
                                ),
                            ));
                        }
                        computation.push(cost);
                    }
                }
                CostSpec::Table(table) => {
                    for proc in platform.processor_ids() {
                        let proc_name = platform.processor_name(proc);
                        let cost = table.get(proc_name).copied().ok_or_else(|| {
                            HeftError::incomplete_cost(
                                name,
                                format!("no cost given for processor '{proc_name}'"),
                            )
                        })?;
                        if !cost.is_finite() || cost < 0.0 {
                            return Err(HeftError::incomplete_cost(
                                name,
                                format!(
                                    "cost on processor '{proc_name}' must be finite and >= 0 \
                                     (got {cost})"
                                ),
                            ));
                        }
                        computation.push(cost);
                    }
                    for extra in table.keys().filter(|p| platform.processor_id(p).is_none()) {
                        warn!(task = %name, processor = %extra, "ignoring cost for undeclared processor");
                    }
                }
            }
        }

        let transfers = graph
            .edges()
            .iter()
            .map(|edge| ((edge.from, edge.to), edge.data_size_mb))
            .collect();

        Ok(Self {
            computation,
            procs,
            transfers,
            interconnect: platform.interconnect(),
            task_names: graph.task_names().map(str::to_string).collect(),
        })
    }

    pub fn processor_count(&self) -> usize {
        self.procs
    }

    /// Execution time of `task` on `proc`, in ms.
    #[inline]
    pub fn computation_cost(&self, task: TaskId, proc: ProcId) -> f64 {
        self.computation[task * self.procs + proc]
    }

    /// Transfer time of the `parent -> child` data onto `target`, in ms.
    ///
    /// Zero when the parent runs on `target` or has no processor yet (the
    /// latter is the rank-time query). Otherwise
    /// `data / bandwidth * 1000 + latency`, which must be finite.
    pub fn communication_cost(
        &self,
        parent: TaskId,
        child: TaskId,
        target: ProcId,
        parent_proc: Option<ProcId>,
    ) -> Result<f64> {
        match parent_proc {
            None => Ok(0.0),
            Some(p) if p == target => Ok(0.0),
            Some(_) => {
                let data = self.data_volume(parent, child)?;
                let time = self.interconnect.transfer_time_ms(data);
                if !time.is_finite() {
                    return Err(HeftError::InvalidConfig(format!(
                        "transfer time for '{}' -> '{}' is not finite ({data} MB)",
                        self.task_name(parent),
                        self.task_name(child)
                    )));
                }
                Ok(time)
            }
        }
    }

    /// Execution times of `task` on every processor, in declaration order.
    pub fn computation_costs(&self, task: TaskId) -> &[f64] {
        &self.computation[task * self.procs..(task + 1) * self.procs]
    }

    /// Mean execution time of `task` over all declared processors.
    pub fn average_computation_cost(&self, task: TaskId) -> Result<f64> {
        if self.procs == 0 {
            return Err(HeftError::InvalidConfig(
                "average cost is undefined without processors".to_string(),
            ));
        }
        let row = self.computation_costs(task);
        Ok(row.iter().sum::<f64>() / self.procs as f64)
    }

    /// Mean transfer time for `parent -> child` over all processors, with no
    /// assignment known for the parent.
    ///
    /// Every term is the unassigned case, so this is currently always 0. It
    /// stays a separate step so ranks can later use provisional assignments.
    pub fn average_communication_cost(&self, parent: TaskId, child: TaskId) -> Result<f64> {
        if self.procs == 0 {
            return Err(HeftError::InvalidConfig(
                "average cost is undefined without processors".to_string(),
            ));
        }
        let mut total = 0.0;
        for proc in 0..self.procs {
            total += self.communication_cost(parent, child, proc, None)?;
        }
        Ok(total / self.procs as f64)
    }

    fn data_volume(&self, parent: TaskId, child: TaskId) -> Result<f64> {
        self.transfers
            .get(&(parent, child))
            .copied()
            .ok_or_else(|| HeftError::MissingEdgeData {
                from: self.task_name(parent),
                to: self.task_name(child),
            })
    }

    fn task_name(&self, task: TaskId) -> String {
        self.task_names
            .get(task)
            .cloned()
            .unwrap_or_else(|| format!("#{task}"))
    }
}
