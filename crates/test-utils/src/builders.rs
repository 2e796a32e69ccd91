#![allow(dead_code)]

use heftmap::config::{EdgeSpec, NodeSpec, ProblemFile, ProcessorSpec, SystemConfig, WorkloadSpec};
use indexmap::IndexMap;

/// Builder for `WorkloadSpec` to simplify test setup.
pub struct WorkloadBuilder {
    workload: WorkloadSpec,
}

impl WorkloadBuilder {
    pub fn new() -> Self {
        Self {
            workload: WorkloadSpec::default(),
        }
    }

    pub fn id(mut self, workload_id: &str) -> Self {
        self.workload.workload_id = Some(workload_id.to_string());
        self
    }

    /// Task whose cost is derived from processor performance.
    pub fn intensity_task(mut self, id: &str, intensity: f64) -> Self {
        self.workload.nodes.push(NodeSpec::with_intensity(id, intensity));
        self
    }

    /// Task with an explicit per-processor cost table (ms).
    pub fn cost_task(mut self, id: &str, costs: &[(&str, f64)]) -> Self {
        self.workload
            .nodes
            .push(NodeSpec::with_costs(id, costs.iter().map(|&(p, c)| (p, c))));
        self
    }

    pub fn node(mut self, node: NodeSpec) -> Self {
        self.workload.nodes.push(node);
        self
    }

    pub fn edge(mut self, from: &str, to: &str, data_size_mb: f64) -> Self {
        self.workload.edges.push(EdgeSpec::new(from, to, data_size_mb));
        self
    }

    pub fn named_edge(mut self, from: &str, to: &str, data_size_mb: f64, name: &str) -> Self {
        let mut edge = EdgeSpec::new(from, to, data_size_mb);
        edge.name = Some(name.to_string());
        self.workload.edges.push(edge);
        self
    }

    pub fn build(self) -> WorkloadSpec {
        self.workload
    }
}

impl Default for WorkloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `SystemConfig`. Processors keep insertion order.
pub struct SystemBuilder {
    processors: IndexMap<String, ProcessorSpec>,
    bandwidth_mbps: f64,
    latency_ms: f64,
}

impl SystemBuilder {
    /// Defaults: no processors, 1000 MB/s, 2 ms.
    pub fn new() -> Self {
        Self {
            processors: IndexMap::new(),
            bandwidth_mbps: 1000.0,
            latency_ms: 2.0,
        }
    }

    pub fn processor(mut self, name: &str, performance_gflops: f64) -> Self {
        self.processors
            .insert(name.to_string(), ProcessorSpec { performance_gflops });
        self
    }

    pub fn bandwidth(mut self, mbps: f64) -> Self {
        self.bandwidth_mbps = mbps;
        self
    }

    pub fn latency(mut self, ms: f64) -> Self {
        self.latency_ms = ms;
        self
    }

    pub fn build(self) -> SystemConfig {
        SystemConfig {
            processors: self.processors,
            bandwidth_mbps: self.bandwidth_mbps,
            latency_ms: self.latency_ms,
        }
    }
}

impl Default for SystemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Combine a workload and a system into a `ProblemFile`.
pub fn problem(workload: WorkloadSpec, system: SystemConfig) -> ProblemFile {
    ProblemFile {
        workload,
        system_config: system,
    }
}

/// Four-task diamond:
/// A -> {B, C} -> D on CPU (100), GPU (500), TPU (300), 1000 MB/s, 5 ms.
pub fn diamond_example() -> (WorkloadSpec, SystemConfig) {
    let workload = WorkloadBuilder::new()
        .intensity_task("A", 10.0)
        .intensity_task("B", 20.0)
        .intensity_task("C", 15.0)
        .intensity_task("D", 25.0)
        .edge("A", "B", 50.0)
        .edge("A", "C", 30.0)
        .edge("B", "D", 40.0)
        .edge("C", "D", 20.0)
        .build();
    let system = SystemBuilder::new()
        .processor("CPU", 100.0)
        .processor("GPU", 500.0)
        .processor("TPU", 300.0)
        .bandwidth(1000.0)
        .latency(5.0)
        .build();
    (workload, system)
}

/// Data-heavy fork/join: Load -> {Process1, Process2} -> Merge with 500 MB
/// and 200 MB edges, CPU (100) and GPU (500), 100 MB/s, 10 ms.
pub fn data_intensive_example() -> (WorkloadSpec, SystemConfig) {
    let workload = WorkloadBuilder::new()
        .intensity_task("Load", 20.0)
        .intensity_task("Process1", 100.0)
        .intensity_task("Process2", 100.0)
        .intensity_task("Merge", 50.0)
        .edge("Load", "Process1", 500.0)
        .edge("Load", "Process2", 500.0)
        .edge("Process1", "Merge", 200.0)
        .edge("Process2", "Merge", 200.0)
        .build();
    let system = SystemBuilder::new()
        .processor("CPU", 100.0)
        .processor("GPU", 500.0)
        .bandwidth(100.0)
        .latency(10.0)
        .build();
    (workload, system)
}
