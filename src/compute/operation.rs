//! Bulk arithmetic over the cells selected by filter criteria.
//!
//! Results are copy-on-write: the input matrix is borrowed back unchanged
//! when no cell changes, otherwise a new snapshot is returned.

use crate::config::{FilterCriteria, FilterState, Matrix, Operation, OperationKind};
use std::borrow::Cow;

/// New value of a cell, or `None` to leave it unchanged.
///
/// Division by exactly zero and any non-finite result leave the cell as is.
pub fn transform(current: f64, operation: &Operation) -> Option<f64> {
    let value = operation.value;
    let next = match operation.kind {
        OperationKind::Assign => value,
        OperationKind::Add => current + value,
        OperationKind::Subtract => current - value,
        OperationKind::Multiply => current * value,
        OperationKind::Divide if value == 0.0 => return None,
        OperationKind::Divide => current / value,
        OperationKind::Absolute => current.abs(),
    };
    next.is_finite().then_some(next)
}

/// Apply `operation` to every cell in `criteria`.
///
/// Indices outside the matrix are ignored.
///
/// # Examples
///
/// ```
/// use chronogrid::compute::operation::apply_operation;
/// use chronogrid::{FilterCriteria, Matrix, Operation, OperationKind};
///
/// let matrix = Matrix::try_from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let criteria = FilterCriteria { columns_indices: vec![1], rows_indices: vec![0, 1] };
/// let result = apply_operation(&matrix, &criteria, &Operation::new(OperationKind::Multiply, 10.0));
/// assert_eq!(result.to_rows(), vec![vec![1.0, 20.0], vec![3.0, 40.0]]);
/// ```
pub fn apply_operation<'a>(
    matrix: &'a Matrix,
    criteria: &FilterCriteria,
    operation: &Operation,
) -> Cow<'a, Matrix> {
    if criteria.is_empty() {
        return Cow::Borrowed(matrix);
    }

    let mut output: Option<Matrix> = None;
    let mut skipped = 0usize;

    for &row in &criteria.rows_indices {
        for &col in &criteria.columns_indices {
            let Some(current) = matrix.get(row, col) else {
                continue;
            };
            match transform(current, operation) {
                Some(next) if next != current => {
                    output.get_or_insert_with(|| matrix.clone()).set(row, col, next);
                }
                Some(_) => {}
                None => skipped += 1,
            }
        }
    }

    if skipped > 0 {
        log::warn!(
            "Operation {:?} left {} cells unchanged (division by zero or non-finite result)",
            operation.kind,
            skipped
        );
    }

    match output {
        Some(matrix) => Cow::Owned(matrix),
        None => Cow::Borrowed(matrix),
    }
}

/// Apply the operation configured in `state` when the filter is active.
pub fn apply_filter<'a>(
    matrix: &'a Matrix,
    state: &FilterState,
    criteria: &FilterCriteria,
) -> Cow<'a, Matrix> {
    if !state.active {
        return Cow::Borrowed(matrix);
    }
    apply_operation(matrix, criteria, &state.operation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::try_from_rows(&[vec![1.0, -2.0, 3.0], vec![4.0, 5.0, -6.0]]).unwrap()
    }

    fn all_cells() -> FilterCriteria {
        FilterCriteria::everything(2, 3)
    }

    #[test]
    fn test_each_kind() {
        let matrix = sample();
        let run = |kind, value| {
            apply_operation(&matrix, &all_cells(), &Operation::new(kind, value))
                .into_owned()
                .to_rows()
        };
        assert_eq!(run(OperationKind::Assign, 7.0)[0], vec![7.0, 7.0, 7.0]);
        assert_eq!(run(OperationKind::Add, 1.0)[0], vec![2.0, -1.0, 4.0]);
        assert_eq!(run(OperationKind::Subtract, 1.0)[1], vec![3.0, 4.0, -7.0]);
        assert_eq!(run(OperationKind::Multiply, 2.0)[1], vec![8.0, 10.0, -12.0]);
        assert_eq!(run(OperationKind::Divide, 2.0)[0], vec![0.5, -1.0, 1.5]);
        assert_eq!(run(OperationKind::Absolute, 99.0)[1], vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_divide_by_zero_is_noop() {
        let matrix = sample();
        let result = apply_operation(
            &matrix,
            &all_cells(),
            &Operation::new(OperationKind::Divide, 0.0),
        );
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(*result, matrix);
    }

    #[test]
    fn test_only_selected_cells_change() {
        let matrix = sample();
        let criteria = FilterCriteria {
            columns_indices: vec![0, 2],
            rows_indices: vec![1],
        };
        let result = apply_operation(&matrix, &criteria, &Operation::new(OperationKind::Assign, 0.0));
        assert_eq!(result.to_rows(), vec![vec![1.0, -2.0, 3.0], vec![0.0, 5.0, 0.0]]);
        // Input snapshot untouched
        assert_eq!(matrix, sample());
    }

    #[test]
    fn test_empty_criteria_is_noop() {
        let matrix = sample();
        let criteria = FilterCriteria {
            columns_indices: vec![0],
            rows_indices: vec![],
        };
        let result = apply_operation(&matrix, &criteria, &Operation::new(OperationKind::Add, 1.0));
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_out_of_range_indices_ignored() {
        let matrix = sample();
        let criteria = FilterCriteria {
            columns_indices: vec![0, 7],
            rows_indices: vec![0, 9],
        };
        let result = apply_operation(&matrix, &criteria, &Operation::new(OperationKind::Add, 1.0));
        assert_eq!(result.get(0, 0), Some(2.0));
        assert_eq!(result.get(1, 0), Some(4.0));
    }

    #[test]
    fn test_overflow_is_skipped() {
        let matrix = Matrix::try_from_rows(&[vec![f64::MAX, 1.0]]).unwrap();
        let result = apply_operation(
            &matrix,
            &FilterCriteria::everything(1, 2),
            &Operation::new(OperationKind::Multiply, 10.0),
        );
        assert_eq!(result.get(0, 0), Some(f64::MAX));
        assert_eq!(result.get(0, 1), Some(10.0));
    }

    #[test]
    fn test_inactive_filter_is_noop() {
        let matrix = sample();
        let mut state = FilterState::defaults_for(3);
        state.operation = Operation::new(OperationKind::Add, 1.0);
        let result = apply_filter(&matrix, &state, &all_cells());
        assert!(matches!(result, Cow::Borrowed(_)));

        state.active = true;
        let result = apply_filter(&matrix, &state, &all_cells());
        assert!(matches!(result, Cow::Owned(_)));
    }
}
