// src/cost/mod.rs

//! Cost model: what a task costs on a processor, and what moving its output
//! to another processor costs.
//!
//! - [`platform`] holds the validated processors and interconnect.
//! - [`model`] resolves per-task costs into a dense lookup table.

pub mod model;
pub mod platform;

pub use model::CostModel;
pub use platform::{Interconnect, Platform};
