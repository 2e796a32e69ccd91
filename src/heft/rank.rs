// src/heft/rank.rs

//! Upward rank: estimated time from the start of a task to the end of the
//! longest path to any exit task.

use anyhow::anyhow;
use tracing::{debug, trace};

use crate::cost::CostModel;
use crate::dag::interner::TaskId;
use crate::dag::ValidatedDag;
use crate::errors::{HeftError, Result};

/// Compute the upward rank of every task, indexed by [`TaskId`].
///
/// ```text
/// rank(t) = avg_comp(t)                                       if t is an exit
/// rank(t) = avg_comp(t) + max_s (avg_comm(t, s) + rank(s))    otherwise
/// ```
///
/// Post-order traversal with an explicit stack and a memo, so each rank is
/// computed once (O(V + E)) and depth is not bounded by the call stack.
pub fn upward_ranks(dag: &ValidatedDag, costs: &CostModel) -> Result<Vec<f64>> {
    let graph = dag.graph();
    let mut memo: Vec<Option<f64>> = vec![None; graph.len()];

    for root in graph.task_ids() {
        if memo[root].is_some() {
            continue;
        }

        // (task, successors already pushed)
        let mut stack: Vec<(TaskId, bool)> = vec![(root, false)];
        while let Some((task, expanded)) = stack.pop() {
            if memo[task].is_some() {
                continue;
            }

            if !expanded {
                stack.push((task, true));
                for &succ in graph.successors(task) {
                    if memo[succ].is_none() {
                        stack.push((succ, false));
                    }
                }
                continue;
            }

            let avg_comp = costs.average_computation_cost(task)?;
            let mut max_tail = 0.0_f64;
            for &succ in graph.successors(task) {
                let succ_rank = memo[succ].ok_or_else(|| HeftError::CycleDetected {
                    task: graph.task_name(task).to_string(),
                    cycle: vec![
                        graph.task_name(task).to_string(),
                        graph.task_name(succ).to_string(),
                    ],
                })?;
                let avg_comm = costs.average_communication_cost(task, succ)?;
                max_tail = max_tail.max(avg_comm + succ_rank);
            }

            let rank = if graph.successors(task).is_empty() {
                avg_comp
            } else {
                avg_comp + max_tail
            };
            trace!(task = %graph.task_name(task), rank, "computed upward rank");
            memo[task] = Some(rank);
        }
    }

    let ranks = memo
        .into_iter()
        .enumerate()
        .map(|(task, rank)| {
            rank.ok_or_else(|| {
                HeftError::Other(anyhow!(
                    "no upward rank computed for task '{}'",
                    graph.task_name(task)
                ))
            })
        })
        .collect::<Result<Vec<f64>>>()?;
    debug!(tasks = ranks.len(), "upward ranks computed");
    Ok(ranks)
}
