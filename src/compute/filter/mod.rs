//! Axis filter evaluation and row filter combination.
//!
//! Row filters in the same temporal dimension are OR-ed together; the
//! per-dimension results are AND-ed. The column axis carries a single filter.

mod combinator;
mod predicate;

pub use combinator::{combine, combine_with, group_by_dimension, select_row_filter};
pub use predicate::{Predicate, matches, select, select_by};
