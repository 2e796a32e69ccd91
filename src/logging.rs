// src/logging.rs

//! `tracing` subscriber setup.
//!
//! The filter is picked in this order:
//! 1. `--log-level`, applied to every target;
//! 2. `HEFTMAP_LOG`, read as `EnvFilter` directives, so
//!    `HEFTMAP_LOG=heftmap::heft=trace` narrows output to the engine;
//! 3. `warn`.
//!
//! Everything goes to stderr; stdout only carries reports.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "HEFTMAP_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber. Call once, before any work starts.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(cli_level, env.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

/// Resolve the filter from the CLI flag and the raw `HEFTMAP_LOG` value.
///
/// A blank or unparsable environment value falls back to `warn`.
pub fn build_filter(cli_level: Option<LogLevel>, env: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level.as_directive());
    }

    env.map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
