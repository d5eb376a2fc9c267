//! Thread-safe wrapper for sharing a session between threads.
//!
//! Enable the `sync` feature to use this module:
//!
//! ```toml
//! [dependencies]
//! chronogrid = { version = "0.1", features = ["sync"] }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use chronogrid::{MatrixData, SyncSession};
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = SyncSession::new();
//! session.load(MatrixData::new(vec![vec![1.0, 2.0]]), None)?;
//!
//! let editor = session.clone();
//! let handle = thread::spawn(move || editor.set_cell(0, 1, 5.0));
//! handle.join().unwrap()?;
//!
//! assert_eq!(session.read().matrix().get(0, 0), Some(5.0));
//! # Ok(())
//! # }
//! ```

use super::MatrixSession;
use crate::coordinator::ListenerId;
use crate::compute::temporal::DateTimeSeries;
use crate::config::{Aggregates, EngineConfig, FilterCriteria, FilterState, MatrixData, TimeSeriesRecipe};
use crate::error::Result;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Thread-safe wrapper around `MatrixSession` using `Arc<RwLock<MatrixSession>>`.
///
/// Readers (criteria, aggregates, snapshots of the matrix) proceed
/// concurrently; edits and filter changes take the write lock.
#[derive(Clone, Debug)]
pub struct SyncSession {
    inner: Arc<RwLock<MatrixSession>>,
}

impl SyncSession {
    pub fn new() -> Self {
        Self::from_session(MatrixSession::new())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        Ok(Self::from_session(MatrixSession::with_config(config)?))
    }

    pub fn from_session(session: MatrixSession) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    pub fn load(&self, data: MatrixData, series: Option<DateTimeSeries>) -> Result<()> {
        self.inner.write().load(data, series)
    }

    pub fn load_with_recipe(&self, data: MatrixData, recipe: &TimeSeriesRecipe) -> Result<()> {
        self.inner.write().load_with_recipe(data, recipe)
    }

    pub fn set_cell(&self, row: usize, grid_col: usize, value: f64) -> Result<bool> {
        self.inner.write().set_cell(row, grid_col, value)
    }

    pub fn set_filter_state(&self, state: FilterState) -> bool {
        self.inner.write().set_filter_state(state)
    }

    pub fn apply_filter_operation(&self) -> Result<bool> {
        self.inner.write().apply_filter_operation()
    }

    pub fn undo(&self) -> Result<bool> {
        self.inner.write().undo()
    }

    pub fn redo(&self) -> Result<bool> {
        self.inner.write().redo()
    }

    /// Register a criteria listener.
    ///
    /// Listeners run while the write lock is held. Calling any method of this
    /// session (or a clone of it) from inside a listener deadlocks; forward
    /// the criteria over a channel instead.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: FnMut(&FilterCriteria) + Send + Sync + 'static,
    {
        self.inner.write().subscribe(listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.write().unsubscribe(id)
    }

    pub fn filter_state(&self) -> FilterState {
        self.inner.read().filter_state().clone()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.inner.read().criteria().clone()
    }

    pub fn aggregates(&self) -> Aggregates {
        self.inner.read().aggregates().clone()
    }

    pub fn to_matrix_data(&self) -> MatrixData {
        self.inner.read().to_matrix_data()
    }

    /// Shared access for reads spanning several accessors.
    pub fn read(&self) -> RwLockReadGuard<'_, MatrixSession> {
        self.inner.read()
    }

    /// Exclusive access for edits spanning several calls.
    pub fn write(&self) -> RwLockWriteGuard<'_, MatrixSession> {
        self.inner.write()
    }
}

impl Default for SyncSession {
    fn default() -> Self {
        Self::new()
    }
}
