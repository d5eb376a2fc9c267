//! # chronogrid-types
//!
//! Core matrix, filter and temporal data types for the chronogrid engine.
//!
//! This crate provides the serializable data model shared by the engine and
//! its collaborators (data source, renderer, persistence):
//!
//! - **Matrix types**: `Matrix`, `MatrixData`
//! - **Temporal types**: `TemporalDimension`, `TimeLevel`, `TimeSeriesRecipe`
//! - **Filter types**: `AxisFilter`, `RowFilter`, `FilterState`, `FilterCriteria`
//! - **Grid types**: `ColumnDescriptor`, `ColumnKind`
//! - **Aggregate types**: `AggregateType`, `Aggregates`
//! - **Operation types**: `Operation`, `OperationKind`
//!
//! Filter state serializes with camelCase field names so that the JSON shape
//! used by the grid UI round-trips unchanged.
//!
//! ## Examples
//!
//! ```rust
//! use chronogrid_types::filter::{AxisFilter, FilterState, RowFilter};
//! use chronogrid_types::temporal::TemporalDimension;
//!
//! let mut state = FilterState::defaults_for(3);
//! state.active = true;
//! state
//!     .rows_filters
//!     .push(RowFilter::new(TemporalDimension::Month, AxisFilter::list(vec![1, 2])));
//! assert_eq!(state.rows_filters.len(), 1);
//! ```

pub mod aggregate;
pub mod column;
pub mod filter;
pub mod matrix;
pub mod operation;
pub mod stats;
pub mod temporal;
