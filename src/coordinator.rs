//! Filter preview coordination.
//!
//! The coordinator owns the user-editable [`FilterState`] of one grid and
//! keeps the derived [`FilterCriteria`] in step with it. Criteria are
//! recomputed whenever the filter state, the matrix dimensions or the time
//! series change, and listeners are notified only when the new criteria
//! differ from the previous ones.
//!
//! Preview states:
//! - `Inactive`: filter off, criteria select every cell
//! - `ActiveHidden`: filter on, criteria computed but not highlighted
//! - `ActivePreview`: filter on, criteria exposed for highlighting
//!
//! Hosts that compute criteria off the calling thread take a
//! [`RecomputeInputs`] snapshot and hand the result back through
//! [`FilterPreviewCoordinator::complete`]; results computed from inputs that
//! have since changed are dropped.

use crate::compute::filter::{combine, combine_with, select, select_row_filter};
use crate::compute::temporal::{DateTimeSeries, TemporalIndexer};
use crate::config::{AxisFilter, CoordinatorStats, FilterCriteria, FilterState, TemporalDimension};
use rustc_hash::FxHashMap;
use std::sync::Arc;

const MEMO_CAPACITY: usize = 256;

/// Resolve a filter state into criteria for a `rows` x `cols` matrix.
///
/// An inactive state selects everything.
///
/// # Examples
///
/// ```
/// use chronogrid::coordinator::recompute;
/// use chronogrid::{AxisFilter, FilterState, RowFilter, TemporalDimension};
///
/// let mut state = FilterState::defaults_for(4);
/// assert_eq!(recompute(&state, 10, 4, None).rows_indices.len(), 10);
///
/// state.active = true;
/// state.columns_filter = AxisFilter::range(2, 3);
/// state.rows_filters = vec![RowFilter::new(TemporalDimension::DayOfYear, AxisFilter::list(vec![1, 10]))];
/// let criteria = recompute(&state, 10, 4, None);
/// assert_eq!(criteria.columns_indices, vec![1, 2]);
/// assert_eq!(criteria.rows_indices, vec![0, 9]);
/// ```
pub fn recompute(
    state: &FilterState,
    rows: usize,
    cols: usize,
    series: Option<&DateTimeSeries>,
) -> FilterCriteria {
    if !state.active {
        return FilterCriteria::everything(rows, cols);
    }
    let indexer = TemporalIndexer::new(series);
    FilterCriteria {
        columns_indices: select(cols, &state.columns_filter),
        rows_indices: combine(&state.rows_filters, rows, &indexer),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewState {
    Inactive,
    ActiveHidden,
    ActivePreview,
}

/// Identifies the input generation a recomputation started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecomputeTicket {
    generation: u64,
}

impl RecomputeTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Owned copy of everything a recomputation reads.
#[derive(Debug, Clone)]
pub struct RecomputeInputs {
    pub ticket: RecomputeTicket,
    pub state: FilterState,
    pub rows: usize,
    pub cols: usize,
    pub series: Option<Arc<DateTimeSeries>>,
}

impl RecomputeInputs {
    pub fn run(&self) -> FilterCriteria {
        recompute(&self.state, self.rows, self.cols, self.series.as_deref())
    }
}

/// Row selections per (dimension, filter), valid for one set of matrix
/// dimensions and one time series.
#[derive(Debug, Default)]
struct SelectionMemo {
    entries: FxHashMap<(TemporalDimension, AxisFilter), Arc<[usize]>>,
    hits: u64,
}

impl SelectionMemo {
    fn get_or_insert_with<F>(
        &mut self,
        dimension: TemporalDimension,
        filter: &AxisFilter,
        compute: F,
    ) -> Arc<[usize]>
    where
        F: FnOnce() -> Vec<usize>,
    {
        let key = (dimension, filter.clone());
        if let Some(rows) = self.entries.get(&key) {
            self.hits += 1;
            log::trace!("Memo hit for {} filter", dimension);
            return Arc::clone(rows);
        }

        if self.entries.len() >= MEMO_CAPACITY {
            self.entries.clear();
        }
        let rows: Arc<[usize]> = compute().into();
        self.entries.insert(key, Arc::clone(&rows));
        rows
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

pub type CriteriaListener = Box<dyn FnMut(&FilterCriteria) + Send + Sync>;

/// Handle returned by [`FilterPreviewCoordinator::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct FilterPreviewCoordinator {
    state: FilterState,
    preview: bool,
    rows: usize,
    cols: usize,
    series: Option<Arc<DateTimeSeries>>,
    generation: u64,
    criteria: FilterCriteria,
    memo: SelectionMemo,
    listeners: Vec<(ListenerId, CriteriaListener)>,
    next_listener: u64,
    stats: CoordinatorStats,
}

impl FilterPreviewCoordinator {
    /// Create an inactive coordinator for a `rows` x `cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            state: FilterState::defaults_for(cols),
            preview: false,
            rows,
            cols,
            series: None,
            generation: 0,
            criteria: FilterCriteria::everything(rows, cols),
            memo: SelectionMemo::default(),
            listeners: Vec::new(),
            next_listener: 0,
            stats: CoordinatorStats::default(),
        }
    }

    pub fn preview_state(&self) -> PreviewState {
        match (self.state.active, self.preview) {
            (false, _) => PreviewState::Inactive,
            (true, false) => PreviewState::ActiveHidden,
            (true, true) => PreviewState::ActivePreview,
        }
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.state
    }

    /// Current criteria; every cell while the filter is inactive.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Criteria to highlight, present only in the `ActivePreview` state.
    pub fn highlighted(&self) -> Option<&FilterCriteria> {
        (self.preview_state() == PreviewState::ActivePreview).then_some(&self.criteria)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn series(&self) -> Option<&Arc<DateTimeSeries>> {
        self.series.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stats(&self) -> &CoordinatorStats {
        &self.stats
    }

    /// Register a callback run whenever the criteria change.
    ///
    /// Listeners run synchronously inside the call that changed the
    /// criteria, while the coordinator (and any session or lock around it)
    /// is mutably borrowed. They must not call back into the same session;
    /// through a `SyncSession` that would deadlock.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&FilterCriteria) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Replace the filter state. Returns `true` if the criteria changed.
    pub fn set_filter_state(&mut self, state: FilterState) -> bool {
        if state == self.state {
            return false;
        }
        if self.state.active && !state.active {
            self.preview = false;
        }
        self.state = state;
        self.invalidate();
        self.refresh()
    }

    pub fn set_active(&mut self, active: bool) -> bool {
        if self.state.active == active {
            return false;
        }
        let mut state = self.state.clone();
        state.active = active;
        self.set_filter_state(state)
    }

    pub fn toggle_active(&mut self) -> bool {
        self.set_active(!self.state.active)
    }

    /// Show or hide the preview. Ignored while the filter is inactive.
    pub fn set_preview(&mut self, preview: bool) -> PreviewState {
        if self.state.active {
            self.preview = preview;
        }
        self.preview_state()
    }

    pub fn toggle_preview(&mut self) -> PreviewState {
        self.set_preview(!self.preview)
    }

    /// Update the matrix dimensions. An inactive filter state is reset to
    /// the defaults for the new dimensions.
    pub fn set_dimensions(&mut self, rows: usize, cols: usize) -> bool {
        if (rows, cols) == (self.rows, self.cols) {
            return false;
        }
        self.apply_dimensions(rows, cols);
        self.invalidate();
        self.refresh()
    }

    /// Replace the time series the row filters are evaluated against.
    pub fn set_time_series(&mut self, series: Option<Arc<DateTimeSeries>>) -> bool {
        if same_series(self.series.as_ref(), series.as_ref()) {
            return false;
        }
        self.series = series;
        self.memo.clear();
        self.invalidate();
        self.refresh()
    }

    /// Update dimensions and series together, recomputing once.
    pub fn reload(
        &mut self,
        rows: usize,
        cols: usize,
        series: Option<Arc<DateTimeSeries>>,
    ) -> bool {
        let dims_changed = (rows, cols) != (self.rows, self.cols);
        let series_changed = !same_series(self.series.as_ref(), series.as_ref());
        if !dims_changed && !series_changed {
            return false;
        }
        if dims_changed {
            self.apply_dimensions(rows, cols);
        }
        self.series = series;
        self.memo.clear();
        self.invalidate();
        self.refresh()
    }

    /// Ticket for a recomputation of the current inputs.
    pub fn begin_recompute(&self) -> RecomputeTicket {
        RecomputeTicket {
            generation: self.generation,
        }
    }

    /// Snapshot the current inputs for a recomputation run elsewhere.
    pub fn inputs(&self) -> RecomputeInputs {
        RecomputeInputs {
            ticket: self.begin_recompute(),
            state: self.state.clone(),
            rows: self.rows,
            cols: self.cols,
            series: self.series.clone(),
        }
    }

    /// Publish criteria computed for `ticket`.
    ///
    /// Returns `true` if they were accepted and differ from the current
    /// criteria. Results for an outdated ticket are dropped.
    pub fn complete(&mut self, ticket: RecomputeTicket, criteria: FilterCriteria) -> bool {
        if ticket.generation != self.generation {
            self.stats.stale_results_dropped += 1;
            log::debug!(
                "Dropping criteria from generation {} (current {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.publish(criteria)
    }

    fn apply_dimensions(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        if !self.state.active {
            self.state = FilterState::defaults_for(cols);
        }
        self.memo.clear();
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    fn refresh(&mut self) -> bool {
        let ticket = self.begin_recompute();
        let criteria = self.compute();
        self.complete(ticket, criteria)
    }

    fn compute(&mut self) -> FilterCriteria {
        if !self.state.active {
            return FilterCriteria::everything(self.rows, self.cols);
        }

        let rows = self.rows;
        let indexer = TemporalIndexer::new(self.series.as_deref());
        let memo = &mut self.memo;
        let rows_indices = combine_with(&self.state.rows_filters, rows, |filter| {
            memo.get_or_insert_with(filter.indexing_type, &filter.filter, || {
                select_row_filter(filter, rows, &indexer)
            })
        });
        self.stats.memo_hits = self.memo.hits;

        FilterCriteria {
            columns_indices: select(self.cols, &self.state.columns_filter),
            rows_indices,
        }
    }

    fn publish(&mut self, criteria: FilterCriteria) -> bool {
        self.stats.recomputations += 1;

        if criteria == self.criteria {
            self.stats.suppressed_notifications += 1;
            log::debug!("Criteria unchanged at generation {}", self.generation);
            return false;
        }

        self.criteria = criteria;
        for (_, listener) in &mut self.listeners {
            listener(&self.criteria);
        }
        self.stats.notifications += 1;
        log::debug!(
            "Criteria updated: {} rows x {} columns",
            self.criteria.rows_indices.len(),
            self.criteria.columns_indices.len()
        );
        true
    }
}

impl std::fmt::Debug for FilterPreviewCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterPreviewCoordinator")
            .field("state", &self.state)
            .field("preview", &self.preview)
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("generation", &self.generation)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

fn same_series(a: Option<&Arc<DateTimeSeries>>, b: Option<&Arc<DateTimeSeries>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a == b,
        (None, None) => true,
        _ => false,
    }
}
