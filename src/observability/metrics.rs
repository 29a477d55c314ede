//! Per-module counters
//!
//! - Counters only, monotonic
//! - Shared by every cursor of a module through an `Arc`
//! - Relaxed atomics; values are exact once cursors are quiescent

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for one registered table function
#[derive(Debug, Default)]
pub struct TableFuncMetrics {
    negotiations: AtomicU64,
    negotiations_rejected: AtomicU64,
    cursors_opened: AtomicU64,
    iterator_pulls: AtomicU64,
    rows_produced: AtomicU64,
    early_exits: AtomicU64,
    iteration_errors: AtomicU64,
}

impl TableFuncMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_negotiations(&self) {
        self.negotiations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_negotiations_rejected(&self) {
        self.negotiations_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_cursors_opened(&self) {
        self.cursors_opened.fetch_add(1, Ordering::Relaxed);
    }

    /// One call into the user iterator, whatever its outcome
    pub fn increment_iterator_pulls(&self) {
        self.iterator_pulls.fetch_add(1, Ordering::Relaxed);
    }

    /// One row made current on a cursor
    pub fn increment_rows_produced(&self) {
        self.rows_produced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_early_exits(&self) {
        self.early_exits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_iteration_errors(&self) {
        self.iteration_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn iterator_pulls(&self) -> u64 {
        self.iterator_pulls.load(Ordering::Relaxed)
    }

    pub fn early_exits(&self) -> u64 {
        self.early_exits.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            negotiations: self.negotiations.load(Ordering::Relaxed),
            negotiations_rejected: self.negotiations_rejected.load(Ordering::Relaxed),
            cursors_opened: self.cursors_opened.load(Ordering::Relaxed),
            iterator_pulls: self.iterator_pulls.load(Ordering::Relaxed),
            rows_produced: self.rows_produced.load(Ordering::Relaxed),
            early_exits: self.early_exits.load(Ordering::Relaxed),
            iteration_errors: self.iteration_errors.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`TableFuncMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub negotiations: u64,
    pub negotiations_rejected: u64,
    pub cursors_opened: u64,
    pub iterator_pulls: u64,
    pub rows_produced: u64,
    pub early_exits: u64,
    pub iteration_errors: u64,
}

impl MetricsSnapshot {
    /// Counter deltas since an earlier snapshot
    pub fn since(&self, earlier: &MetricsSnapshot) -> MetricsSnapshot {
        MetricsSnapshot {
            negotiations: self.negotiations - earlier.negotiations,
            negotiations_rejected: self.negotiations_rejected - earlier.negotiations_rejected,
            cursors_opened: self.cursors_opened - earlier.cursors_opened,
            iterator_pulls: self.iterator_pulls - earlier.iterator_pulls,
            rows_produced: self.rows_produced - earlier.rows_produced,
            early_exits: self.early_exits - earlier.early_exits,
            iteration_errors: self.iteration_errors - earlier.iteration_errors,
        }
    }

    /// Serialize as a JSON object
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
