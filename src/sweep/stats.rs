//! Sweep Statistics Module
//!
//! Tracks the outcome of sweep passes for health and metrics reporting.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Sweep Stats ==
/// Cumulative outcome of the sweep passes run by one janitor.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepStats {
    /// Number of completed sweep passes
    pub sweeps_completed: u64,
    /// Total number of artifacts removed across all passes
    pub files_removed: u64,
    /// Number of artifacts removed by the most recent pass
    pub last_removed: u64,
    /// Number of passes that failed before scanning the directory
    pub sweep_failures: u64,
    /// Completion time of the most recent successful pass
    pub last_sweep_at: Option<DateTime<Utc>>,
}

impl SweepStats {
    // == Constructor ==
    /// Creates a new SweepStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Sweep ==
    /// Records a completed sweep pass and the number of files it removed.
    pub fn record_sweep(&mut self, removed: usize) {
        self.sweeps_completed += 1;
        self.files_removed += removed as u64;
        self.last_removed = removed as u64;
        self.last_sweep_at = Some(Utc::now());
    }

    // == Record Failure ==
    /// Records a sweep pass that failed before it could scan the directory.
    pub fn record_failure(&mut self) {
        self.sweep_failures += 1;
    }
}
