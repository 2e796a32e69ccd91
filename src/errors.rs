// src/errors.rs

//! Crate-wide error type.
//!
//! Every failure the engine can report is a variant of [`HeftError`]. The
//! binary wraps these in `anyhow` at the very top; the library never does.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeftError {
    #[error("Malformed graph: {0}")]
    MalformedGraph(String),

    #[error(
        "Cycle detected in task graph involving task '{task}' (cycle members: {})",
        .cycle.join(", ")
    )]
    CycleDetected { task: String, cycle: Vec<String> },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing edge data for '{from}' -> '{to}'")]
    MissingEdgeData { from: String, to: String },

    #[error("Incomplete cost specification for task '{task}': {reason}")]
    IncompleteCostSpec { task: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HeftError {
    /// Stable label for the failure category, used in batch records and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            HeftError::MalformedGraph(_) => "MalformedGraph",
            HeftError::CycleDetected { .. } => "CycleDetected",
            HeftError::InvalidConfig(_) => "InvalidConfig",
            HeftError::MissingEdgeData { .. } => "MissingEdgeData",
            HeftError::IncompleteCostSpec { .. } => "IncompleteCostSpec",
            HeftError::IoError(_) => "Io",
            HeftError::JsonError(_) => "Json",
            HeftError::TomlError(_) => "Toml",
            HeftError::Other(_) => "Other",
        }
    }

    pub(crate) fn incomplete_cost(task: &str, reason: impl Into<String>) -> Self {
        HeftError::IncompleteCostSpec {
            task: task.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HeftError>;
