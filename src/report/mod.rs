// src/report/mod.rs

//! Human-readable reporting on top of a [`ScheduleResult`](crate::heft::ScheduleResult).
//!
//! None of this feeds back into the engine.

pub mod summary;
pub mod text;

pub use summary::{ProcessorUsage, ScheduleSummary, SingleProcessorBaseline};
pub use text::{render_quiet, render_results, render_workload};
