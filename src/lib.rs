//! Temporal indexing, filtering and aggregation engine for time-series matrix grids.
//!
//! Rows of a matrix are indexed by calendar dimensions (month, week, weekday,
//! hour of year, ...) derived from a UTC time series. Row and column filters
//! resolve into [`FilterCriteria`], bulk operations are applied to the
//! selected cells, and per-row aggregates are kept up to date.
//!
//! ```rust
//! use chronogrid::{
//!     AxisFilter, MatrixData, MatrixSession, RowFilter, TemporalDimension, TimeLevel,
//!     TimeSeriesRecipe,
//! };
//!
//! let mut session = MatrixSession::new();
//! let data = MatrixData::new(vec![vec![1.0]; 365]);
//! session.load_with_recipe(data, &TimeSeriesRecipe::new("2023-01-01", 365, TimeLevel::Daily))?;
//!
//! let mut state = session.filter_state().clone();
//! state.active = true;
//! state.rows_filters = vec![
//!     RowFilter::new(TemporalDimension::Month, AxisFilter::list(vec![3])),
//!     RowFilter::new(TemporalDimension::Month, AxisFilter::list(vec![9])),
//! ];
//! session.set_filter_state(state);
//! assert_eq!(session.criteria().rows_indices.len(), 61);
//! # Ok::<(), chronogrid::GridError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod session;

pub use builder::SessionBuilder;
pub use coordinator::{FilterPreviewCoordinator, ListenerId, PreviewState, RecomputeTicket};
pub use error::{GridError, Result};
pub use session::{HistoryBackend, MatrixSession, MemoryHistory, Snapshot};

#[cfg(feature = "sync")]
pub use session::SyncSession;

pub use compute::columns::ColumnMapper;
pub use compute::temporal::{DateTimeSeries, TemporalIndexer};

pub use config::{
    AggregateType, Aggregates, AxisFilter, ColumnDescriptor, ColumnKind, CoordinatorStats,
    DEFAULT_FIRST_WEEK_SIZE, EngineConfig, FilterCriteria, FilterOperator, FilterState,
    LayoutConfig, Matrix, MatrixData, Operation, OperationKind, RowFilter, SessionStats,
    TemporalDimension, TimeLevel, TimeSeriesRecipe, ValueRange,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GridError, MatrixSession, Result, SessionBuilder};

    pub use crate::{FilterPreviewCoordinator, PreviewState};

    pub use crate::{
        AxisFilter, FilterCriteria, FilterState, Operation, OperationKind, RowFilter,
        TemporalDimension,
    };

    pub use crate::{DateTimeSeries, EngineConfig, Matrix, MatrixData, TimeLevel, TimeSeriesRecipe};

    pub use crate::compute::aggregate::compute as compute_aggregates;
    pub use crate::compute::filter::{combine, select};
    pub use crate::compute::operation::apply_operation;

    #[cfg(feature = "sync")]
    pub use crate::SyncSession;
}
