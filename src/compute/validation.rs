//! Validation for data entering the engine.

use crate::config::{Matrix, MatrixData, Operation};
use crate::error::{GridError, Result};

/// Validates that matrix data is rectangular and agrees with its column titles.
///
/// # Examples
///
/// ```
/// use chronogrid::compute::validation::validate_matrix_data;
/// use chronogrid::MatrixData;
///
/// assert!(validate_matrix_data(&MatrixData::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]])).is_ok());
///
/// // Ragged rows
/// assert!(validate_matrix_data(&MatrixData::new(vec![vec![1.0, 2.0], vec![3.0]])).is_err());
/// ```
pub fn validate_matrix_data(data: &MatrixData) -> Result<()> {
    let width = data.data.first().map_or(0, Vec::len);

    for (idx, row) in data.data.iter().enumerate() {
        if row.len() != width {
            return Err(GridError::InvalidInput(format!(
                "Row at index {} has {} values, expected {}",
                idx,
                row.len(),
                width
            )));
        }
    }

    if !data.data.is_empty() && !data.columns.is_empty() && data.columns.len() != width {
        return Err(GridError::DimensionMismatch {
            what: "column titles",
            expected: width,
            actual: data.columns.len(),
        });
    }

    Ok(())
}

/// Validates that a time series has exactly one timestamp per row.
pub fn validate_series_length(series_len: usize, rows: usize) -> Result<()> {
    if series_len != rows {
        return Err(GridError::DimensionMismatch {
            what: "time series",
            expected: rows,
            actual: series_len,
        });
    }
    Ok(())
}

/// Validates the number of days in the first week of the year.
///
/// # Examples
///
/// ```
/// use chronogrid::compute::validation::validate_first_week_size;
///
/// assert!(validate_first_week_size(7).is_ok());
/// assert!(validate_first_week_size(0).is_err());
/// assert!(validate_first_week_size(8).is_err());
/// ```
pub fn validate_first_week_size(size: u8) -> Result<()> {
    if !(1..=7).contains(&size) {
        return Err(GridError::InvalidInput(format!(
            "First week size must be between 1 and 7, got: {}",
            size
        )));
    }
    Ok(())
}

/// Validates that an operation operand is finite when the operation uses it.
pub fn validate_operation(operation: &Operation) -> Result<()> {
    if operation.kind.uses_value() && !operation.value.is_finite() {
        return Err(GridError::InvalidInput(format!(
            "Operation value must be finite, got: {}",
            operation.value
        )));
    }
    Ok(())
}

/// Validates a single cell edit against the matrix shape.
pub fn validate_cell(matrix: &Matrix, row: usize, col: usize, value: f64) -> Result<()> {
    if row >= matrix.rows() || col >= matrix.cols() {
        return Err(GridError::InvalidInput(format!(
            "Cell ({}, {}) is outside the {}x{} matrix",
            row,
            col,
            matrix.rows(),
            matrix.cols()
        )));
    }

    if !value.is_finite() {
        return Err(GridError::InvalidInput(format!(
            "Cell value must be finite, got: {}",
            value
        )));
    }

    Ok(())
}
