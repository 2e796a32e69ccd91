// src/config/loader.rs

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::config::model::{ProblemFile, SystemConfig, WorkloadSpec};
use crate::errors::{HeftError, Result};

/// Interconnect used for bare workloads when the caller gives no override.
pub const DEFAULT_BANDWIDTH_MBPS: f64 = 1000.0;
pub const DEFAULT_LATENCY_MS: f64 = 2.0;

/// Optional command-line overrides for the shared interconnect.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InterconnectOverrides {
    pub bandwidth_mbps: Option<f64>,
    pub latency_ms: Option<f64>,
}

/// Parsed input document, before any semantic validation.
#[derive(Debug, Clone, PartialEq)]
pub enum InputDocument {
    /// `{ "workload": ..., "system_config": ... }`
    Full(ProblemFile),
    /// `{ "nodes": ..., "edges": ... }` with per-node cost tables.
    Bare(WorkloadSpec),
}

/// Read a document from disk and decode it.
///
/// `.toml` files are parsed as TOML, anything else as JSON. This only
/// performs deserialization; graph and platform checks happen when the
/// engine builds a [`Problem`](crate::heft::Problem).
pub fn load_from_path(path: impl AsRef<Path>) -> Result<InputDocument> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let value: Value = if is_toml {
        let table: toml::Table = toml::from_str(&contents)?;
        serde_json::to_value(table)?
    } else {
        serde_json::from_str(&contents)?
    };

    debug!(path = %path.display(), toml = is_toml, "decoded input document");
    parse_document(value)
}

/// Decide between the full and the bare layout and deserialize accordingly.
pub fn parse_document(value: Value) -> Result<InputDocument> {
    if value.get("workload").is_some() || value.get("system_config").is_some() {
        Ok(InputDocument::Full(serde_json::from_value(value)?))
    } else {
        Ok(InputDocument::Bare(serde_json::from_value(value)?))
    }
}

/// Load a document and turn it into a complete problem, applying overrides.
///
/// This is the recommended entry point for the CLI and batch tooling.
pub fn load_problem(
    path: impl AsRef<Path>,
    overrides: InterconnectOverrides,
) -> Result<ProblemFile> {
    let document = load_from_path(path)?;
    resolve_document(document, overrides)
}

/// Turn a parsed document into a [`ProblemFile`].
///
/// - Full documents keep their own interconnect unless overridden.
/// - Bare documents take their processors from the first node's cost table
///   and their interconnect from the overrides (or the defaults).
pub fn resolve_document(
    document: InputDocument,
    overrides: InterconnectOverrides,
) -> Result<ProblemFile> {
    match document {
        InputDocument::Full(mut problem) => {
            if let Some(bandwidth) = overrides.bandwidth_mbps {
                problem.system_config.bandwidth_mbps = bandwidth;
            }
            if let Some(latency) = overrides.latency_ms {
                problem.system_config.latency_ms = latency;
            }
            Ok(problem)
        }
        InputDocument::Bare(workload) => {
            if workload.nodes.is_empty() {
                return Err(HeftError::MalformedGraph(
                    "workload must have a non-empty 'nodes' array".to_string(),
                ));
            }
            let system_config = SystemConfig::from_cost_tables(
                &workload,
                overrides.bandwidth_mbps.unwrap_or(DEFAULT_BANDWIDTH_MBPS),
                overrides.latency_ms.unwrap_or(DEFAULT_LATENCY_MS),
            )
            .ok_or_else(|| {
                HeftError::InvalidConfig(
                    "bare workload nodes must carry a 'costs' table to derive processors"
                        .to_string(),
                )
            })?;

            Ok(ProblemFile {
                workload,
                system_config,
            })
        }
    }
}
