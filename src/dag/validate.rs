// src/dag/validate.rs

use std::collections::VecDeque;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::dag::graph::TaskGraph;
use crate::dag::interner::TaskId;
use crate::errors::{HeftError, Result};

/// A [`TaskGraph`] proven to be acyclic, together with one topological order.
///
/// Rank computation recurses along successor edges, so it only accepts this
/// type; the only way to obtain one is through [`ValidatedDag::try_from`].
#[derive(Debug, Clone)]
pub struct ValidatedDag {
    graph: TaskGraph,
    topo_order: Vec<TaskId>,
}

impl ValidatedDag {
    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    /// Kahn order; entry tasks are released in declaration order.
    pub fn topological_order(&self) -> &[TaskId] {
        &self.topo_order
    }

    pub fn into_graph(self) -> TaskGraph {
        self.graph
    }
}

impl TryFrom<TaskGraph> for ValidatedDag {
    type Error = HeftError;

    fn try_from(graph: TaskGraph) -> std::result::Result<Self, Self::Error> {
        let topo_order = topological_order(&graph)?;
        Ok(Self { graph, topo_order })
    }
}

/// Kahn's algorithm over the predecessor counts.
///
/// If fewer tasks than declared come out, the remainder contains a cycle and
/// `CycleDetected` is returned with one of its members.
pub fn topological_order(graph: &TaskGraph) -> Result<Vec<TaskId>> {
    let mut in_degree: Vec<usize> = graph
        .task_ids()
        .map(|task| graph.predecessors(task).len())
        .collect();

    let mut queue: VecDeque<TaskId> = graph
        .task_ids()
        .filter(|&task| in_degree[task] == 0)
        .collect();
    let mut order = Vec::with_capacity(graph.len());

    while let Some(task) = queue.pop_front() {
        order.push(task);
        for &succ in graph.successors(task) {
            in_degree[succ] -= 1;
            if in_degree[succ] == 0 {
                queue.push_back(succ);
            }
        }
    }

    if order.len() < graph.len() {
        let unresolved: Vec<TaskId> = graph
            .task_ids()
            .filter(|&task| in_degree[task] > 0)
            .collect();
        return Err(cycle_error(graph, &unresolved));
    }

    debug!(tasks = order.len(), "task graph is acyclic");
    Ok(order)
}

/// Build a `CycleDetected` error naming a task that actually sits on a cycle.
///
/// Kahn's remainder can also hold tasks that are merely downstream of a
/// cycle, so the strongly connected components of the remainder are used to
/// find a real one. The named task is the cycle member declared first.
fn cycle_error(graph: &TaskGraph, unresolved: &[TaskId]) -> HeftError {
    let mut sub: DiGraph<TaskId, ()> = DiGraph::with_capacity(unresolved.len(), 0);
    let mut node_of: Vec<Option<NodeIndex>> = vec![None; graph.len()];
    for &task in unresolved {
        node_of[task] = Some(sub.add_node(task));
    }
    for &task in unresolved {
        for &succ in graph.successors(task) {
            if let (Some(a), Some(b)) = (node_of[task], node_of[succ]) {
                sub.add_edge(a, b, ());
            }
        }
    }

    let mut cycle: Vec<TaskId> = tarjan_scc(&sub)
        .into_iter()
        .find(|component| {
            component.len() > 1 || component.iter().any(|&n| sub.contains_edge(n, n))
        })
        .map(|component| component.into_iter().map(|n| sub[n]).collect())
        // A stalled Kahn pass always leaves a cycle behind; fall back to the
        // whole remainder just in case.
        .unwrap_or_else(|| unresolved.to_vec());
    cycle.sort_unstable();

    let names: Vec<String> = cycle
        .iter()
        .map(|&task| graph.task_name(task).to_string())
        .collect();

    HeftError::CycleDetected {
        task: names.first().cloned().unwrap_or_default(),
        cycle: names,
    }
}
