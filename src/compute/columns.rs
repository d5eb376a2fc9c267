//! Mapping between visual grid columns and logical data columns.
//!
//! A grid shows display-only columns (row header, dates, aggregates) next to
//! the numeric data columns. Only `Number` columns exist in the data array.

use crate::config::{AggregateType, ColumnDescriptor, LayoutConfig};

/// Bidirectional grid/data column mapping built from a column layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapper {
    grid_to_data: Vec<Option<usize>>,
    data_to_grid: Vec<usize>,
}

impl ColumnMapper {
    /// Build the mapping for an ordered list of grid columns.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronogrid::compute::columns::ColumnMapper;
    /// use chronogrid::{AggregateType, ColumnDescriptor};
    ///
    /// let mapper = ColumnMapper::new(&[
    ///     ColumnDescriptor::text("Time"),
    ///     ColumnDescriptor::number("A"),
    ///     ColumnDescriptor::number("B"),
    ///     ColumnDescriptor::aggregate(AggregateType::Avg),
    /// ]);
    /// assert_eq!(mapper.grid_to_data(0), None);
    /// assert_eq!(mapper.grid_to_data(2), Some(1));
    /// assert_eq!(mapper.data_to_grid(1), Some(2));
    /// ```
    pub fn new(columns: &[ColumnDescriptor]) -> Self {
        let mut grid_to_data = Vec::with_capacity(columns.len());
        let mut data_to_grid = Vec::new();

        for (grid_col, column) in columns.iter().enumerate() {
            if column.is_data() {
                grid_to_data.push(Some(data_to_grid.len()));
                data_to_grid.push(grid_col);
            } else {
                grid_to_data.push(None);
            }
        }

        Self {
            grid_to_data,
            data_to_grid,
        }
    }

    /// Data column behind grid column `col`, or `None` for display-only columns.
    pub fn grid_to_data(&self, col: usize) -> Option<usize> {
        self.grid_to_data.get(col).copied().flatten()
    }

    pub fn data_to_grid(&self, data_col: usize) -> Option<usize> {
        self.data_to_grid.get(data_col).copied()
    }

    pub fn grid_len(&self) -> usize {
        self.grid_to_data.len()
    }

    pub fn data_len(&self) -> usize {
        self.data_to_grid.len()
    }

    /// Translate selected data columns into grid columns for highlighting.
    pub fn to_grid_columns(&self, data_cols: &[usize]) -> Vec<usize> {
        data_cols
            .iter()
            .filter_map(|&col| self.data_to_grid(col))
            .collect()
    }
}

/// Grid columns for a matrix with `data_cols` data columns.
///
/// Data columns without a title are numbered from 1.
pub fn build_layout(
    titles: &[String],
    data_cols: usize,
    has_series: bool,
    layout: &LayoutConfig,
    aggregates: &[AggregateType],
) -> Vec<ColumnDescriptor> {
    let mut columns = Vec::with_capacity(data_cols + aggregates.len() + 2);

    if layout.row_header {
        columns.push(ColumnDescriptor::text(""));
    }
    if layout.date_column && has_series {
        columns.push(ColumnDescriptor::datetime("Date"));
    }

    columns.extend((0..data_cols).map(|col| match titles.get(col) {
        Some(title) => ColumnDescriptor::number(title.clone()),
        None => ColumnDescriptor::number((col + 1).to_string()),
    }));

    let mut seen = Vec::with_capacity(aggregates.len());
    for &aggregate in aggregates {
        if !seen.contains(&aggregate) {
            seen.push(aggregate);
            columns.push(ColumnDescriptor::aggregate(aggregate));
        }
    }

    columns
}
