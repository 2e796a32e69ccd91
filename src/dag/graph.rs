// src/dag/graph.rs

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::config::model::WorkloadSpec;
use crate::dag::interner::{IdIndex, TaskId};
use crate::errors::{HeftError, Result};

/// A resolved dependency edge between two interned tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: TaskId,
    pub to: TaskId,
    /// Megabytes moved from `from` to `to`.
    pub data_size_mb: f64,
    pub name: Option<String>,
}

/// Task graph with predecessor/successor adjacency, indexed by [`TaskId`].
///
/// Built once from the workload and read-only afterwards. Building only
/// checks referential integrity; acyclicity is checked separately by
/// [`ValidatedDag`](crate::dag::ValidatedDag).
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: IdIndex,
    /// Direct predecessors, in edge declaration order.
    preds: Vec<Vec<TaskId>>,
    /// Direct successors, in edge declaration order.
    succs: Vec<Vec<TaskId>>,
    edges: Vec<Edge>,
    edge_lookup: FxHashMap<(TaskId, TaskId), usize>,
}

impl TaskGraph {
    /// Build the graph from a workload in O(V + E).
    ///
    /// Fails with `MalformedGraph` when:
    /// - there are no tasks,
    /// - a task has no id, or an id is declared twice,
    /// - an edge misses an endpoint or references an unknown task,
    /// - the same `(from, to)` pair appears twice,
    /// - an edge's data size is negative or not finite.
    pub fn build(workload: &WorkloadSpec) -> Result<Self> {
        if workload.nodes.is_empty() {
            return Err(HeftError::MalformedGraph(
                "workload must contain at least one task".to_string(),
            ));
        }

        let mut tasks = IdIndex::with_capacity(workload.nodes.len());
        for (position, node) in workload.nodes.iter().enumerate() {
            let id = node.id.as_deref().ok_or_else(|| {
                HeftError::MalformedGraph(format!("task at position {position} has no 'id'"))
            })?;
            if tasks.insert(id).is_none() {
                return Err(HeftError::MalformedGraph(format!(
                    "task '{id}' is declared more than once"
                )));
            }
        }

        let n = tasks.len();
        let mut preds: Vec<Vec<TaskId>> = vec![Vec::new(); n];
        let mut succs: Vec<Vec<TaskId>> = vec![Vec::new(); n];
        let mut edges = Vec::with_capacity(workload.edges.len());
        let mut edge_lookup =
            FxHashMap::with_capacity_and_hasher(workload.edges.len(), Default::default());

        for (position, spec) in workload.edges.iter().enumerate() {
            let (Some(from_name), Some(to_name)) = (spec.from.as_deref(), spec.to.as_deref())
            else {
                return Err(HeftError::MalformedGraph(format!(
                    "edge at position {position} must have both 'from' and 'to'"
                )));
            };

            let from = tasks.get(from_name).ok_or_else(|| {
                HeftError::MalformedGraph(format!(
                    "edge '{from_name}' -> '{to_name}' references unknown task '{from_name}'"
                ))
            })?;
            let to = tasks.get(to_name).ok_or_else(|| {
                HeftError::MalformedGraph(format!(
                    "edge '{from_name}' -> '{to_name}' references unknown task '{to_name}'"
                ))
            })?;

            if !spec.data_size_mb.is_finite() || spec.data_size_mb < 0.0 {
                return Err(HeftError::MalformedGraph(format!(
                    "edge '{from_name}' -> '{to_name}' has invalid data size {} MB",
                    spec.data_size_mb
                )));
            }

            if edge_lookup.insert((from, to), edges.len()).is_some() {
                return Err(HeftError::MalformedGraph(format!(
                    "edge '{from_name}' -> '{to_name}' is declared more than once"
                )));
            }

            preds[to].push(from);
            succs[from].push(to);
            edges.push(Edge {
                from,
                to,
                data_size_mb: spec.data_size_mb,
                name: spec.name.clone(),
            });
        }

        debug!(tasks = n, edges = edges.len(), "built task graph");

        Ok(Self {
            tasks,
            preds,
            succs,
            edges,
            edge_lookup,
        })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All task ids in declaration order.
    pub fn task_ids(&self) -> std::ops::Range<TaskId> {
        0..self.tasks.len()
    }

    pub fn task_name(&self, task: TaskId) -> &str {
        self.tasks.name(task)
    }

    pub fn task_id(&self, name: &str) -> Option<TaskId> {
        self.tasks.get(name)
    }

    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.names()
    }

    /// Immediate predecessors of a task (tasks it depends on).
    pub fn predecessors(&self, task: TaskId) -> &[TaskId] {
        self.preds.get(task).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Immediate successors of a task (tasks depending on it).
    pub fn successors(&self, task: TaskId) -> &[TaskId] {
        self.succs.get(task).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The unique edge `from -> to`, if declared.
    pub fn edge(&self, from: TaskId, to: TaskId) -> Option<&Edge> {
        self.edge_lookup
            .get(&(from, to))
            .and_then(|&idx| self.edges.get(idx))
    }
}
