use serde::{Deserialize, Serialize};

/// Counters kept by a matrix editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Matrices loaded (each load replaces the previous one)
    pub loads: u64,
    /// Single cell edits committed
    pub cell_edits: u64,
    /// Bulk filter operations that changed at least one cell
    pub operations_applied: u64,
    pub undo_count: u64,
    pub redo_count: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_load(&mut self) {
        self.loads += 1;
    }

    pub fn record_cell_edit(&mut self) {
        self.cell_edits += 1;
    }

    pub fn record_operation(&mut self) {
        self.operations_applied += 1;
    }
}

/// Counters kept by the filter preview coordinator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorStats {
    /// Criteria computations run to completion
    pub recomputations: u64,
    /// Listener notifications delivered
    pub notifications: u64,
    /// Recomputations whose result equalled the previous criteria
    pub suppressed_notifications: u64,
    /// Results discarded because newer inputs arrived first
    pub stale_results_dropped: u64,
    pub memo_hits: u64,
}
