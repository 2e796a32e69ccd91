// src/config/validate.rs

use crate::config::model::SystemConfig;
use crate::cost::platform::{Interconnect, Platform};
use crate::dag::interner::IdIndex;
use crate::errors::{HeftError, Result};

impl TryFrom<&SystemConfig> for Platform {
    type Error = HeftError;

    fn try_from(cfg: &SystemConfig) -> std::result::Result<Self, Self::Error> {
        validate_system_config(cfg)?;

        let mut processors = IdIndex::with_capacity(cfg.processors.len());
        let mut performance = Vec::with_capacity(cfg.processors.len());
        for (name, spec) in cfg.processors.iter() {
            // IndexMap keys are unique, so every insert is fresh.
            if processors.insert(name).is_some() {
                performance.push(spec.performance_gflops);
            }
        }

        Ok(Platform {
            processors,
            performance,
            interconnect: Interconnect {
                bandwidth_mbps: cfg.bandwidth_mbps,
                latency_ms: cfg.latency_ms,
            },
        })
    }
}

/// Platform-level checks.
///
/// This checks:
/// - at least one processor is declared
/// - `bandwidth_MBps` is finite and `> 0`
/// - `latency_ms` is finite and `>= 0`
///
/// Performance ratings are only checked when a task actually derives its
/// cost from them (see [`CostModel`](crate::cost::CostModel)).
pub fn validate_system_config(cfg: &SystemConfig) -> Result<()> {
    ensure_has_processors(cfg)?;
    validate_interconnect(cfg)?;
    Ok(())
}

fn ensure_has_processors(cfg: &SystemConfig) -> Result<()> {
    if cfg.processors.is_empty() {
        return Err(HeftError::InvalidConfig(
            "system_config.processors must declare at least one processor".to_string(),
        ));
    }
    Ok(())
}

fn validate_interconnect(cfg: &SystemConfig) -> Result<()> {
    if !cfg.bandwidth_mbps.is_finite() || cfg.bandwidth_mbps <= 0.0 {
        return Err(HeftError::InvalidConfig(format!(
            "system_config.bandwidth_MBps must be > 0 (got {})",
            cfg.bandwidth_mbps
        )));
    }

    if !cfg.latency_ms.is_finite() || cfg.latency_ms < 0.0 {
        return Err(HeftError::InvalidConfig(format!(
            "system_config.latency_ms must be >= 0 (got {})",
            cfg.latency_ms
        )));
    }

    Ok(())
}
