// src/cost/platform.rs

//! Validated processors and interconnect.

use crate::dag::interner::{IdIndex, ProcId};

/// Shared link between any two distinct processors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interconnect {
    /// MB/s, always `> 0`.
    pub bandwidth_mbps: f64,
    /// Fixed per-transfer latency in ms, always `>= 0`.
    pub latency_ms: f64,
}

impl Interconnect {
    /// Time in ms to move `data_size_mb` between two distinct processors.
    #[inline]
    pub fn transfer_time_ms(&self, data_size_mb: f64) -> f64 {
        data_size_mb / self.bandwidth_mbps * 1000.0 + self.latency_ms
    }
}

/// Declared processors in declaration order, plus the interconnect.
///
/// Constructed from a [`SystemConfig`](crate::config::SystemConfig) through
/// `TryFrom`, which performs all platform checks.
#[derive(Debug, Clone)]
pub struct Platform {
    pub(crate) processors: IdIndex,
    pub(crate) performance: Vec<f64>,
    pub(crate) interconnect: Interconnect,
}

impl Platform {
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    pub fn processor_ids(&self) -> std::ops::Range<ProcId> {
        0..self.processors.len()
    }

    pub fn processor_name(&self, proc: ProcId) -> &str {
        self.processors.name(proc)
    }

    pub fn processor_id(&self, name: &str) -> Option<ProcId> {
        self.processors.get(name)
    }

    /// Performance rating in compute-units per second, as declared.
    pub fn performance(&self, proc: ProcId) -> f64 {
        self.performance[proc]
    }

    pub fn interconnect(&self) -> Interconnect {
        self.interconnect
    }
}
