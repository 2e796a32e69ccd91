// src/dag/mod.rs

//! Task graph representation and validation.
//!
//! - [`interner`] maps identifier strings to dense indices.
//! - [`graph`] holds tasks, edges and predecessor/successor adjacency.
//! - [`validate`] proves the graph acyclic (Kahn) and yields a
//!   [`ValidatedDag`].

pub mod graph;
pub mod interner;
pub mod validate;

pub use graph::{Edge, TaskGraph};
pub use interner::{IdIndex, ProcId, TaskId};
pub use validate::{topological_order, ValidatedDag};
