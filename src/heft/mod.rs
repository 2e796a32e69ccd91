// src/heft/mod.rs

//! The HEFT scheduling engine.
//!
//! - [`rank`] computes upward ranks over a validated DAG.
//! - [`priority`] turns ranks into an assignment order.
//! - [`selector`] greedily places tasks on the earliest-finishing processor.
//! - [`schedule`] holds the working schedule and builds the result.
//!
//! Each call owns all of its state; independent calls can run in parallel
//! without any locking.

pub mod priority;
pub mod rank;
pub mod schedule;
pub mod selector;

use tracing::info;

use crate::config::model::{ProblemFile, SystemConfig, WorkloadSpec};
use crate::cost::{CostModel, Platform};
use crate::dag::{TaskGraph, TaskId, ValidatedDag};
use crate::errors::Result;

pub use priority::OrderingPolicy;
pub use schedule::{Schedule, ScheduleEntry, ScheduleResult, TaskTiming};

/// Knobs for one scheduling run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub ordering: OrderingPolicy,
}

/// Schedule `workload` on `system` with the default options.
pub fn optimize(workload: &WorkloadSpec, system: &SystemConfig) -> Result<ScheduleResult> {
    optimize_with(workload, system, &EngineOptions::default())
}

/// Schedule `workload` on `system`.
///
/// Either returns a complete result (one record per task) or fails; nothing
/// partial is ever returned.
pub fn optimize_with(
    workload: &WorkloadSpec,
    system: &SystemConfig,
    options: &EngineOptions,
) -> Result<ScheduleResult> {
    Problem::new(workload, system)?.schedule(options)
}

/// A validated, cost-resolved scheduling problem.
///
/// Graph, platform and costs are built once and are read-only afterwards;
/// [`Problem::schedule`] can be called any number of times.
#[derive(Debug, Clone)]
pub struct Problem {
    dag: ValidatedDag,
    platform: Platform,
    costs: CostModel,
    workload_id: Option<String>,
}

impl Problem {
    /// Build the graph, check it is a DAG, validate the platform and
    /// resolve all computation costs.
    pub fn new(workload: &WorkloadSpec, system: &SystemConfig) -> Result<Self> {
        let graph = TaskGraph::build(workload)?;
        let dag = ValidatedDag::try_from(graph)?;
        let platform = Platform::try_from(system)?;
        let costs = CostModel::resolve(workload, dag.graph(), &platform)?;

        Ok(Self {
            dag,
            platform,
            costs,
            workload_id: workload.workload_id.clone(),
        })
    }

    pub fn from_file(problem: &ProblemFile) -> Result<Self> {
        Self::new(&problem.workload, &problem.system_config)
    }

    pub fn graph(&self) -> &TaskGraph {
        self.dag.graph()
    }

    pub fn dag(&self) -> &ValidatedDag {
        &self.dag
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn costs(&self) -> &CostModel {
        &self.costs
    }

    pub fn workload_id(&self) -> Option<&str> {
        self.workload_id.as_deref()
    }

    /// Upward rank of every task, indexed by task id.
    pub fn ranks(&self) -> Result<Vec<f64>> {
        rank::upward_ranks(&self.dag, &self.costs)
    }

    /// Order in which tasks are handed to the processor selector.
    pub fn scheduling_order(&self, policy: OrderingPolicy) -> Result<Vec<TaskId>> {
        let ranks = self.ranks()?;
        Ok(priority::scheduling_order(self.graph(), &ranks, policy))
    }

    /// Run the full HEFT pipeline: rank, order, select, aggregate.
    pub fn schedule(&self, options: &EngineOptions) -> Result<ScheduleResult> {
        let order = self.scheduling_order(options.ordering)?;
        let schedule = selector::assign_processors(self.graph(), &self.costs, &order)?;
        let result = schedule::aggregate(self.graph(), &self.platform, &schedule)?;

        info!(
            tasks = self.graph().len(),
            processors = self.platform.len(),
            makespan_ms = result.makespan_ms,
            "schedule complete"
        );
        Ok(result)
    }
}
