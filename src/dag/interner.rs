// src/dag/interner.rs

//! String interning for task and processor identifiers.
//!
//! Identifiers are resolved to dense indices once at load time so the
//! scheduling loop works on plain vectors. Index order is declaration order.

use rustc_hash::FxHashMap;

/// Dense index of a task, in declaration order.
pub type TaskId = usize;

/// Dense index of a processor, in declaration order.
pub type ProcId = usize;

/// Bidirectional map between identifier strings and dense indices.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    to_idx: FxHashMap<String, usize>,
    from_idx: Vec<String>,
}

impl IdIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_idx: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_idx: Vec::with_capacity(capacity),
        }
    }

    /// Insert a new identifier and return its index.
    ///
    /// Returns `None` if the identifier is already present; callers decide
    /// whether a duplicate is an error.
    pub fn insert(&mut self, name: &str) -> Option<usize> {
        if self.to_idx.contains_key(name) {
            return None;
        }
        let idx = self.from_idx.len();
        self.from_idx.push(name.to_string());
        self.to_idx.insert(name.to_string(), idx);
        Some(idx)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<usize> {
        self.to_idx.get(name).copied()
    }

    /// Name for an index.
    ///
    /// Panics if `idx` was not handed out by this table.
    #[inline]
    pub fn name(&self, idx: usize) -> &str {
        &self.from_idx[idx]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.from_idx.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.from_idx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_idx.is_empty()
    }
}
