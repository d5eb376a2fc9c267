use crate::operation::Operation;
use crate::temporal::TemporalDimension;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Inclusive 1-based value range.
///
/// A range missing either bound deserializes to [`ValueRange::EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "PartialRange")]
pub struct ValueRange {
    pub min: i64,
    pub max: i64,
}

/// Range as edited in the UI, where either bound may still be blank.
#[derive(Deserialize)]
struct PartialRange {
    #[serde(default)]
    min: Option<i64>,
    #[serde(default)]
    max: Option<i64>,
}

impl From<PartialRange> for ValueRange {
    fn from(partial: PartialRange) -> Self {
        match (partial.min, partial.max) {
            (Some(min), Some(max)) => ValueRange::new(min, max),
            _ => ValueRange::EMPTY,
        }
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ValueRange {
    /// Range that matches nothing. Stands in for a missing `range` object.
    pub const EMPTY: ValueRange = ValueRange { min: 1, max: 0 };

    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    pub const fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Relational operator applied to a list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    #[default]
    Equals,
    Gt,
    Gte,
    Lt,
    Lte,
    Range,
    /// Operator the engine does not recognize; selects nothing.
    #[serde(other)]
    Unknown,
}

/// Predicate over one axis of a matrix.
///
/// Values are 1-based row/column numbers or temporal dimension values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AxisFilter {
    Range {
        #[serde(default, deserialize_with = "null_as_default")]
        range: ValueRange,
    },
    List {
        #[serde(default, deserialize_with = "null_as_default")]
        list: Vec<i64>,
        #[serde(default)]
        operator: FilterOperator,
    },
    /// Filter whose `type` tag was not recognized; selects nothing.
    #[serde(other)]
    Malformed,
}

impl AxisFilter {
    pub const fn range(min: i64, max: i64) -> Self {
        AxisFilter::Range {
            range: ValueRange::new(min, max),
        }
    }

    pub fn list(values: Vec<i64>) -> Self {
        Self::list_with(values, FilterOperator::Equals)
    }

    pub fn list_with(values: Vec<i64>, operator: FilterOperator) -> Self {
        AxisFilter::List {
            list: values,
            operator,
        }
    }
}

/// Row-axis filter bound to one temporal dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowFilter {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub indexing_type: TemporalDimension,
    #[serde(flatten)]
    pub filter: AxisFilter,
}

impl RowFilter {
    pub fn new(indexing_type: TemporalDimension, filter: AxisFilter) -> Self {
        Self {
            id: Uuid::new_v4(),
            indexing_type,
            filter,
        }
    }
}

/// User-editable filter configuration of a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    pub active: bool,
    pub columns_filter: AxisFilter,
    #[serde(default)]
    pub rows_filters: Vec<RowFilter>,
    #[serde(default)]
    pub operation: Operation,
}

impl FilterState {
    /// Inactive state whose column range covers every column and which has no row filters.
    pub fn defaults_for(cols: usize) -> Self {
        Self {
            active: false,
            columns_filter: AxisFilter::range(1, cols as i64),
            rows_filters: Vec::new(),
            operation: Operation::default(),
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::defaults_for(0)
    }
}

/// Resolved selection: 0-based, strictly increasing indices on each axis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub columns_indices: Vec<usize>,
    pub rows_indices: Vec<usize>,
}

impl FilterCriteria {
    pub fn everything(rows: usize, cols: usize) -> Self {
        Self {
            columns_indices: (0..cols).collect(),
            rows_indices: (0..rows).collect(),
        }
    }

    /// True when no cell is selected.
    pub fn is_empty(&self) -> bool {
        self.columns_indices.is_empty() || self.rows_indices.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.columns_indices.len() * self.rows_indices.len()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.rows_indices.binary_search(&row).is_ok()
            && self.columns_indices.binary_search(&col).is_ok()
    }
}
