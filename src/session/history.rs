//! Undo/redo history for matrix sessions.
//!
//! Every change a session commits is recorded as one [`Snapshot`] of the
//! state before the change, so a bulk operation is undone in a single step.

use crate::config::{Aggregates, Matrix};
use crate::error::Result;
use std::collections::VecDeque;

/// Matrix contents and their derived aggregates at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub matrix: Matrix,
    pub aggregates: Aggregates,
}

/// Trait for undo history implementations
///
/// The default is the bounded in-memory [`MemoryHistory`]; other backends can
/// keep snapshots elsewhere as long as they honor the same ordering.
pub trait HistoryBackend: Send + Sync {
    /// Record the state preceding a change. Clears the redo stack.
    fn push(&mut self, snapshot: Snapshot) -> Result<()>;

    /// Take the most recent undo snapshot, keeping `current` for redo.
    ///
    /// Returns `None` and drops `current` when there is nothing to undo.
    fn undo(&mut self, current: Snapshot) -> Result<Option<Snapshot>>;

    /// Take the most recent redo snapshot, keeping `current` for undo.
    fn redo(&mut self, current: Snapshot) -> Result<Option<Snapshot>>;

    /// Drop all undo and redo snapshots
    fn clear(&mut self) -> Result<()>;

    fn can_undo(&self) -> bool;

    fn can_redo(&self) -> bool;

    /// Number of undo snapshots held
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory history holding at most `capacity` undo snapshots.
#[derive(Debug)]
pub struct MemoryHistory {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    capacity: usize,
}

impl MemoryHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(capacity.min(16)),
            redo: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        if self.undo.len() == self.capacity {
            self.undo.pop_front();
            log::debug!("History full ({}), dropped oldest snapshot", self.capacity);
        }
        self.undo.push_back(snapshot);
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

impl HistoryBackend for MemoryHistory {
    fn push(&mut self, snapshot: Snapshot) -> Result<()> {
        self.redo.clear();
        self.push_undo(snapshot);
        Ok(())
    }

    fn undo(&mut self, current: Snapshot) -> Result<Option<Snapshot>> {
        let Some(previous) = self.undo.pop_back() else {
            return Ok(None);
        };
        self.redo.push(current);
        Ok(Some(previous))
    }

    fn redo(&mut self, current: Snapshot) -> Result<Option<Snapshot>> {
        let Some(next) = self.redo.pop() else {
            return Ok(None);
        };
        self.push_undo(current);
        Ok(Some(next))
    }

    fn clear(&mut self) -> Result<()> {
        self.undo.clear();
        self.redo.clear();
        Ok(())
    }

    fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    fn len(&self) -> usize {
        self.undo.len()
    }
}
