// src/config/model.rs

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Full scheduling problem as read from an input document.
///
/// ```json
/// {
///   "workload": {
///     "nodes": [{ "id": "A", "workload_intensity_GFLOPS": 10 }],
///     "edges": [{ "from": "A", "to": "B", "data_size_MB": 50 }]
///   },
///   "system_config": {
///     "processors": { "CPU": { "performance_GFLOPS": 100 } },
///     "bandwidth_MBps": 1000,
///     "latency_ms": 5
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemFile {
    pub workload: WorkloadSpec,
    pub system_config: SystemConfig,
}

/// The task graph part of the input: nodes plus data-carrying edges.
///
/// The same shape is accepted on its own as a "bare workload" document, in
/// which case the processors are derived from the first node's `costs`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkloadSpec {
    /// Optional human-readable name, only used in reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload_id: Option<String>,

    #[serde(default)]
    pub nodes: Vec<NodeSpec>,

    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

/// One task of the workload.
///
/// Exactly one of `workload_intensity_GFLOPS` or `costs` must be present.
/// `id` is optional at the serde level so that a missing id is reported as
/// a graph error rather than an opaque parse failure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Compute demand in compute-units; divided by a processor's
    /// performance rating to get seconds.
    #[serde(
        default,
        rename = "workload_intensity_GFLOPS",
        skip_serializing_if = "Option::is_none"
    )]
    pub workload_intensity_gflops: Option<f64>,

    /// Direct per-processor execution time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costs: Option<IndexMap<String, f64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A dependency `from -> to` carrying `data_size_MB` megabytes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(default, rename = "data_size_MB")]
    pub data_size_mb: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Processors plus the single shared interconnect.
///
/// `processors` keeps document order: declaration order decides ties when
/// two processors give the same finish time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub processors: IndexMap<String, ProcessorSpec>,

    #[serde(rename = "bandwidth_MBps")]
    pub bandwidth_mbps: f64,

    pub latency_ms: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessorSpec {
    #[serde(rename = "performance_GFLOPS")]
    pub performance_gflops: f64,
}

impl NodeSpec {
    pub fn with_intensity(id: impl Into<String>, intensity: f64) -> Self {
        Self {
            id: Some(id.into()),
            workload_intensity_gflops: Some(intensity),
            ..Self::default()
        }
    }

    pub fn with_costs<I, K>(id: impl Into<String>, costs: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            id: Some(id.into()),
            costs: Some(costs.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            ..Self::default()
        }
    }
}

impl EdgeSpec {
    pub fn new(from: impl Into<String>, to: impl Into<String>, data_size_mb: f64) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            data_size_mb,
            name: None,
        }
    }
}

impl SystemConfig {
    /// Derive a system for a bare workload:
    /// processors are the keys of the first node's cost table, each rated
    /// `1.0` (the rating is unused for cost-table tasks).
    ///
    /// Returns `None` if there are no nodes or the first node has no `costs`.
    pub fn from_cost_tables(
        workload: &WorkloadSpec,
        bandwidth_mbps: f64,
        latency_ms: f64,
    ) -> Option<Self> {
        let costs = workload.nodes.first()?.costs.as_ref()?;
        let processors = costs
            .keys()
            .map(|name| {
                (
                    name.clone(),
                    ProcessorSpec {
                        performance_gflops: 1.0,
                    },
                )
            })
            .collect();

        Some(Self {
            processors,
            bandwidth_mbps,
            latency_ms,
        })
    }
}
