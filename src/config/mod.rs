// src/config/mod.rs

//! Input documents and their validation.
//!
//! Responsibilities:
//! - Define the serde-backed data model (`model.rs`).
//! - Load a workload document from disk (`loader.rs`).
//! - Validate the processor/interconnect description (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, load_problem, InputDocument, InterconnectOverrides};
pub use model::{EdgeSpec, NodeSpec, ProblemFile, ProcessorSpec, SystemConfig, WorkloadSpec};
pub use validate::validate_system_config;
