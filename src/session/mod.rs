//! Matrix editing sessions.
//!
//! A [`MatrixSession`] owns one matrix together with everything derived from
//! it: the optional time series, the grid layout and its column mapping, the
//! per-row aggregates, the filter preview coordinator and the undo history.
//! All edits go through the session so derived state never goes stale.

use crate::compute::aggregate;
use crate::compute::columns::{ColumnMapper, build_layout};
use crate::compute::operation::apply_filter;
use crate::compute::temporal::DateTimeSeries;
use crate::compute::validation::{
    validate_cell, validate_matrix_data, validate_operation, validate_series_length,
};
use crate::config::{
    Aggregates, ColumnDescriptor, CoordinatorStats, EngineConfig, FilterCriteria, FilterState,
    Matrix, MatrixData, SessionStats, TimeLevel, TimeSeriesRecipe,
};
use crate::coordinator::{FilterPreviewCoordinator, ListenerId, PreviewState};
use crate::error::{GridError, Result};
use std::borrow::Cow;
use std::sync::Arc;

mod history;

#[cfg(feature = "sync")]
mod sync;

pub use history::{HistoryBackend, MemoryHistory, Snapshot};

#[cfg(feature = "sync")]
pub use sync::SyncSession;

/// Editing session over a single matrix.
///
/// # Examples
///
/// ```
/// use chronogrid::{AxisFilter, MatrixData, MatrixSession, Operation, OperationKind};
///
/// let mut session = MatrixSession::new();
/// session.load(MatrixData::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]), None)?;
///
/// let mut state = session.filter_state().clone();
/// state.active = true;
/// state.columns_filter = AxisFilter::range(2, 2);
/// state.operation = Operation::new(OperationKind::Add, 10.0);
/// session.set_filter_state(state);
///
/// assert!(session.apply_filter_operation()?);
/// assert_eq!(session.matrix().to_rows(), vec![vec![1.0, 12.0], vec![3.0, 14.0]]);
///
/// session.undo()?;
/// assert_eq!(session.matrix().get(0, 1), Some(2.0));
/// # Ok::<(), chronogrid::GridError>(())
/// ```
pub struct MatrixSession {
    config: EngineConfig,
    matrix: Matrix,
    titles: Vec<String>,
    series: Option<Arc<DateTimeSeries>>,
    columns: Vec<ColumnDescriptor>,
    mapper: ColumnMapper,
    aggregates: Aggregates,
    coordinator: FilterPreviewCoordinator,
    history: Box<dyn HistoryBackend>,
    stats: SessionStats,
}

impl MatrixSession {
    /// Empty session with the default configuration.
    pub fn new() -> Self {
        let config = EngineConfig::default();
        let history = Box::new(MemoryHistory::new(config.history_capacity));
        Self::assemble(config, history)
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        let history = Box::new(MemoryHistory::new(config.history_capacity));
        Self::with_history(config, history)
    }

    /// Session recording undo snapshots into a custom backend.
    pub fn with_history(config: EngineConfig, history: Box<dyn HistoryBackend>) -> Result<Self> {
        config.validate().map_err(GridError::InvalidConfig)?;
        Ok(Self::assemble(config, history))
    }

    fn assemble(config: EngineConfig, history: Box<dyn HistoryBackend>) -> Self {
        let columns = build_layout(&[], 0, false, &config.layout, &config.aggregates);
        Self {
            mapper: ColumnMapper::new(&columns),
            columns,
            config,
            matrix: Matrix::default(),
            titles: Vec::new(),
            series: None,
            aggregates: Aggregates::default(),
            coordinator: FilterPreviewCoordinator::new(0, 0),
            history,
            stats: SessionStats::new(),
        }
    }

    /// Replace the matrix and time series.
    ///
    /// A series whose length differs from the row count is discarded with a
    /// warning and rows are indexed sequentially. Clears the undo history; if
    /// that fails the session is left unchanged.
    pub fn load(&mut self, data: MatrixData, series: Option<DateTimeSeries>) -> Result<()> {
        validate_matrix_data(&data)?;
        let matrix = Matrix::try_from_rows(&data.data).ok_or_else(|| {
            GridError::InvalidInput("Matrix rows must all have the same length".to_string())
        })?;

        let series = series.and_then(|series| {
            match validate_series_length(series.len(), matrix.rows()) {
                Ok(()) => Some(Arc::new(series)),
                Err(e) => {
                    log::warn!("Ignoring time series, using indexed rows: {}", e);
                    None
                }
            }
        });

        // Last fallible step; everything below only commits
        self.history.clear()?;

        self.columns = build_layout(
            &data.columns,
            matrix.cols(),
            series.is_some(),
            &self.config.layout,
            &self.config.aggregates,
        );
        self.mapper = ColumnMapper::new(&self.columns);
        self.aggregates = aggregate::compute(
            &matrix,
            &self.config.aggregates,
            self.config.aggregate_precision,
        );
        self.coordinator
            .reload(matrix.rows(), matrix.cols(), series.clone());

        log::debug!(
            "Loaded {}x{} matrix ({})",
            matrix.rows(),
            matrix.cols(),
            if series.is_some() { "time series" } else { "indexed" }
        );

        self.matrix = matrix;
        self.titles = data.columns;
        self.series = series;
        self.stats.record_load();
        Ok(())
    }

    /// Load `data` with a series generated from `recipe`.
    ///
    /// A recipe that cannot be expanded falls back to indexed rows.
    pub fn load_with_recipe(&mut self, data: MatrixData, recipe: &TimeSeriesRecipe) -> Result<()> {
        let series = match DateTimeSeries::from_recipe(recipe) {
            Ok(series) => Some(series),
            Err(e) => {
                log::warn!("Time series recipe rejected, using indexed rows: {}", e);
                None
            }
        };
        self.load(data, series)
    }

    /// Load `data` with one raw timestamp string per row.
    pub fn load_with_timestamps<S: AsRef<str>>(
        &mut self,
        data: MatrixData,
        timestamps: &[S],
        level: TimeLevel,
    ) -> Result<()> {
        let series = DateTimeSeries::parse(timestamps, level, self.config.first_week_size);
        self.load(data, Some(series))
    }

    /// Edit one cell addressed in grid coordinates.
    ///
    /// Returns `false` if the cell already held `value`.
    pub fn set_cell(&mut self, row: usize, grid_col: usize, value: f64) -> Result<bool> {
        let col = self
            .mapper
            .grid_to_data(grid_col)
            .ok_or(GridError::NotEditable { column: grid_col })?;
        validate_cell(&self.matrix, row, col, value)?;

        if self.matrix.get(row, col) == Some(value) {
            return Ok(false);
        }

        let previous = self.snapshot();
        self.history.push(previous)?;
        self.matrix.set(row, col, value);
        aggregate::refresh_row(
            &mut self.aggregates,
            &self.matrix,
            row,
            &self.config.aggregates,
            self.config.aggregate_precision,
        );
        self.stats.record_cell_edit();
        log::trace!("Cell ({}, {}) set to {}", row, col, value);
        Ok(true)
    }

    /// Apply the configured operation to the filtered cells.
    ///
    /// Returns `false` when the filter is inactive or no cell changed; nothing
    /// is recorded in the history in that case.
    pub fn apply_filter_operation(&mut self) -> Result<bool> {
        let state = self.coordinator.filter_state();
        validate_operation(&state.operation)?;

        let next = match apply_filter(&self.matrix, state, self.coordinator.criteria()) {
            Cow::Borrowed(_) => None,
            Cow::Owned(matrix) => Some(matrix),
        };
        let Some(next) = next else {
            return Ok(false);
        };

        let previous = self.snapshot();
        self.history.push(previous)?;
        self.matrix = next;
        for &row in &self.coordinator.criteria().rows_indices {
            aggregate::refresh_row(
                &mut self.aggregates,
                &self.matrix,
                row,
                &self.config.aggregates,
                self.config.aggregate_precision,
            );
        }
        self.stats.record_operation();
        log::debug!(
            "Applied {:?} to {} cells",
            self.coordinator.filter_state().operation.kind,
            self.coordinator.criteria().cell_count()
        );
        Ok(true)
    }

    /// Restore the state before the last change. Returns `false` if there is none.
    pub fn undo(&mut self) -> Result<bool> {
        if !self.history.can_undo() {
            return Ok(false);
        }
        let current = self.snapshot();
        match self.history.undo(current)? {
            Some(previous) => {
                self.restore(previous);
                self.stats.undo_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Reapply the last undone change. Returns `false` if there is none.
    pub fn redo(&mut self) -> Result<bool> {
        if !self.history.can_redo() {
            return Ok(false);
        }
        let current = self.snapshot();
        match self.history.redo(current)? {
            Some(next) => {
                self.restore(next);
                self.stats.redo_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            matrix: self.matrix.clone(),
            aggregates: self.aggregates.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.matrix = snapshot.matrix;
        self.aggregates = snapshot.aggregates;
    }

    // ===== Filter =====

    /// Replace the filter state. Returns `true` if the criteria changed.
    pub fn set_filter_state(&mut self, state: FilterState) -> bool {
        self.coordinator.set_filter_state(state)
    }

    /// Replace the filter state from its JSON form (the shape a grid UI
    /// persists). On a parse error the current state is kept.
    pub fn set_filter_state_json(&mut self, json: &str) -> Result<bool> {
        let state: FilterState = serde_json::from_str(json)?;
        Ok(self.set_filter_state(state))
    }

    pub fn filter_state_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self.filter_state())?)
    }

    pub fn set_filter_active(&mut self, active: bool) -> bool {
        self.coordinator.set_active(active)
    }

    pub fn toggle_preview(&mut self) -> PreviewState {
        self.coordinator.toggle_preview()
    }

    pub fn filter_state(&self) -> &FilterState {
        self.coordinator.filter_state()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.coordinator.criteria()
    }

    /// Criteria to highlight while the preview is shown.
    pub fn highlighted(&self) -> Option<&FilterCriteria> {
        self.coordinator.highlighted()
    }

    /// Register a callback run whenever the filter criteria change.
    ///
    /// The callback runs while this session is mutably borrowed (or, behind
    /// a `SyncSession`, while its write lock is held),
    /// so it must not call back into the session.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&FilterCriteria) + Send + Sync + 'static,
    {
        self.coordinator.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.coordinator.unsubscribe(id)
    }

    pub fn coordinator(&self) -> &FilterPreviewCoordinator {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut FilterPreviewCoordinator {
        &mut self.coordinator
    }

    // ===== Accessors =====

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Value shown at a grid cell, `None` for display-only columns.
    pub fn cell(&self, row: usize, grid_col: usize) -> Option<f64> {
        let col = self.mapper.grid_to_data(grid_col)?;
        self.matrix.get(row, col)
    }

    pub fn series(&self) -> Option<&DateTimeSeries> {
        self.series.as_deref()
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn mapper(&self) -> &ColumnMapper {
        &self.mapper
    }

    pub fn aggregates(&self) -> &Aggregates {
        &self.aggregates
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn coordinator_stats(&self) -> &CoordinatorStats {
        self.coordinator.stats()
    }

    /// Current contents in the data-source shape, for saving.
    pub fn to_matrix_data(&self) -> MatrixData {
        MatrixData::from(&self.matrix).with_columns(self.titles.clone())
    }
}

impl Default for MatrixSession {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MatrixSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixSession")
            .field("rows", &self.matrix.rows())
            .field("cols", &self.matrix.cols())
            .field("time_series", &self.series.is_some())
            .field("history", &self.history.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
