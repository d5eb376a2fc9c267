use serde::{Deserialize, Serialize};

/// Rectangular numeric grid stored row-major.
///
/// The shape is fixed at construction: `values.len() == rows * cols` always
/// holds, so the type is only built through checked constructors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Matrix {
    /// Create a zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    /// Build from row-major values. Returns `None` if the length does not match the shape.
    pub fn from_values(rows: usize, cols: usize, values: Vec<f64>) -> Option<Self> {
        if rows.checked_mul(cols)? != values.len() {
            return None;
        }
        Some(Self { rows, cols, values })
    }

    /// Build from nested rows. Returns `None` for ragged input.
    pub fn try_from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        let values = rows.iter().flatten().copied().collect();
        Some(Self {
            rows: rows.len(),
            cols,
            values,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.offset(row, col).map(|i| self.values[i])
    }

    /// Overwrite one cell. Returns `false` when the coordinates are out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> bool {
        match self.offset(row, col) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    /// Borrow one row. Out-of-range rows yield an empty slice.
    pub fn row(&self, row: usize) -> &[f64] {
        if row >= self.rows {
            return &[];
        }
        let start = row * self.cols;
        &self.values[start..start + self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |r| self.row(r))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}

/// Matrix payload as delivered by the data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixData {
    pub data: Vec<Vec<f64>>,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl MatrixData {
    pub fn new(data: Vec<Vec<f64>>) -> Self {
        Self {
            data,
            columns: Vec::new(),
        }
    }

    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    pub fn column_count(&self) -> usize {
        self.data.first().map_or(self.columns.len(), Vec::len)
    }
}

impl From<&Matrix> for MatrixData {
    fn from(matrix: &Matrix) -> Self {
        Self::new(matrix.to_rows())
    }
}
