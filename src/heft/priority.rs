// src/heft/priority.rs

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::dag::graph::TaskGraph;
use crate::dag::interner::TaskId;

/// How the rank order is turned into the assignment order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
    /// Plain rank order. A task may come before one of its predecessors
    /// (on rank ties, or zero-cost chains); such a predecessor is then
    /// ignored when computing the task's data-ready time.
    #[default]
    RankOnly,
    /// Rank order, but a task is only released once all of its predecessors
    /// have been placed.
    DependencyRespecting,
}

/// Tasks sorted by rank, highest first.
///
/// Equal ranks keep declaration order (lower [`TaskId`] first). The
/// comparison uses `f64::total_cmp`, so the order is total and reproducible.
pub fn rank_order(ranks: &[f64]) -> Vec<TaskId> {
    let mut order: Vec<TaskId> = (0..ranks.len()).collect();
    order.sort_by(|&a, &b| ranks[b].total_cmp(&ranks[a]).then(a.cmp(&b)));
    order
}

/// Refine a priority order into one that respects dependencies.
///
/// Classic list scheduling: among the tasks whose predecessors are all
/// released, always release the one that comes first in `priority`.
pub fn dependency_respecting_order(graph: &TaskGraph, priority: &[TaskId]) -> Vec<TaskId> {
    let mut position = vec![0usize; graph.len()];
    for (pos, &task) in priority.iter().enumerate() {
        position[task] = pos;
    }

    let mut waiting_on: Vec<usize> = graph
        .task_ids()
        .map(|task| graph.predecessors(task).len())
        .collect();

    let mut ready: BinaryHeap<Reverse<usize>> = priority
        .iter()
        .filter(|&&task| waiting_on[task] == 0)
        .map(|&task| Reverse(position[task]))
        .collect();

    let mut order = Vec::with_capacity(priority.len());
    while let Some(Reverse(pos)) = ready.pop() {
        let task = priority[pos];
        order.push(task);
        for &succ in graph.successors(task) {
            waiting_on[succ] -= 1;
            if waiting_on[succ] == 0 {
                ready.push(Reverse(position[succ]));
            }
        }
    }
    order
}

/// Assignment order for `policy`.
pub fn scheduling_order(graph: &TaskGraph, ranks: &[f64], policy: OrderingPolicy) -> Vec<TaskId> {
    let by_rank = rank_order(ranks);
    match policy {
        OrderingPolicy::RankOnly => by_rank,
        OrderingPolicy::DependencyRespecting => dependency_respecting_order(graph, &by_rank),
    }
}
