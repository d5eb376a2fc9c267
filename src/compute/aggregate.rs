//! Per-row statistics over the data columns of a matrix.
//!
//! `avg` and `total` are rounded to `precision` decimal places (0 by default,
//! i.e. whole numbers). `min`, `max` and `avg` of a row with no columns are
//! `NaN`; `total` of such a row is `0`.

use crate::config::{AggregateType, Aggregates, Matrix};

/// Round half away from zero to `precision` decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    if precision == 0 {
        return value.round();
    }
    let factor = 10f64.powi(precision.min(15) as i32);
    (value * factor).round() / factor
}

/// One statistic over a single row.
pub fn row_statistic(row: &[f64], aggregate: AggregateType, precision: u32) -> f64 {
    match aggregate {
        AggregateType::Min => row.iter().copied().reduce(f64::min).unwrap_or(f64::NAN),
        AggregateType::Max => row.iter().copied().reduce(f64::max).unwrap_or(f64::NAN),
        AggregateType::Avg => {
            if row.is_empty() {
                f64::NAN
            } else {
                round_to(row.iter().sum::<f64>() / row.len() as f64, precision)
            }
        }
        AggregateType::Total => round_to(row.iter().sum(), precision),
    }
}

/// Compute the requested statistics for every row.
///
/// # Examples
///
/// ```
/// use chronogrid::compute::aggregate::compute;
/// use chronogrid::{AggregateType, Matrix};
///
/// let matrix = Matrix::try_from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
/// let aggregates = compute(&matrix, &AggregateType::ALL, 0);
/// assert_eq!(aggregates.min, vec![1.0, 4.0]);
/// assert_eq!(aggregates.total, vec![6.0, 15.0]);
/// ```
pub fn compute(matrix: &Matrix, types: &[AggregateType], precision: u32) -> Aggregates {
    let mut aggregates = Aggregates::default();

    for &aggregate in types {
        let values = aggregates.get_mut(aggregate);
        if !values.is_empty() {
            continue;
        }
        values.extend(
            matrix
                .iter_rows()
                .map(|row| row_statistic(row, aggregate, precision)),
        );
    }

    aggregates
}

/// Recompute the requested statistics of one row in place.
///
/// Gives the same values as [`compute`] for that row; used after single-cell
/// edits so the other rows are left untouched.
pub fn refresh_row(
    aggregates: &mut Aggregates,
    matrix: &Matrix,
    row: usize,
    types: &[AggregateType],
    precision: u32,
) {
    let values = matrix.row(row);
    for &aggregate in types {
        if let Some(slot) = aggregates.get_mut(aggregate).get_mut(row) {
            *slot = row_statistic(values, aggregate, precision);
        }
    }
}
