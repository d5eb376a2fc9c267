//! Engine configuration.
//!
//! Re-exports the data model from `chronogrid-types` for convenience.
use serde::de::Error;

pub use chronogrid_types::aggregate::{AggregateType, Aggregates};
pub use chronogrid_types::column::{ColumnDescriptor, ColumnKind};
pub use chronogrid_types::filter::{
    AxisFilter, FilterCriteria, FilterOperator, FilterState, RowFilter, ValueRange,
};
pub use chronogrid_types::matrix::{Matrix, MatrixData};
pub use chronogrid_types::operation::{Operation, OperationKind};
pub use chronogrid_types::stats::{CoordinatorStats, SessionStats};
pub use chronogrid_types::temporal::{
    DEFAULT_FIRST_WEEK_SIZE, TemporalDimension, TimeLevel, TimeSeriesRecipe,
};

/// Engine configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Decimal places kept for `avg` and `total`; 0 rounds to integers
    #[serde(default)]
    pub aggregate_precision: u32,

    #[serde(default = "EngineConfig::default_aggregates")]
    pub aggregates: Vec<AggregateType>,

    /// Maximum number of undo snapshots retained
    #[serde(default = "EngineConfig::default_history_capacity")]
    pub history_capacity: usize,

    /// Days in the first week of the year for series built from raw timestamps
    #[serde(default = "EngineConfig::default_first_week_size")]
    pub first_week_size: u8,

    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Display columns placed in front of the data columns.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    #[serde(default = "LayoutConfig::default_row_header")]
    pub row_header: bool,

    /// Only honored when the matrix has a time series
    #[serde(default = "LayoutConfig::default_date_column")]
    pub date_column: bool,
}

impl LayoutConfig {
    const fn default_row_header() -> bool {
        true
    }

    const fn default_date_column() -> bool {
        true
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_header: Self::default_row_header(),
            date_column: Self::default_date_column(),
        }
    }
}

impl EngineConfig {
    fn default_aggregates() -> Vec<AggregateType> {
        AggregateType::ALL.to_vec()
    }

    const fn default_history_capacity() -> usize {
        100
    }

    const fn default_first_week_size() -> u8 {
        DEFAULT_FIRST_WEEK_SIZE
    }

    pub fn with_aggregate_precision(mut self, precision: u32) -> Self {
        if precision > 10 {
            log::warn!(
                "Aggregate precision of {} exceeds f64 display precision; values will not round",
                precision
            );
        }
        self.aggregate_precision = precision;
        self
    }

    pub fn with_aggregates(mut self, aggregates: Vec<AggregateType>) -> Self {
        self.aggregates = aggregates;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "History capacity must be greater than zero");
        self.history_capacity = capacity;
        self
    }

    pub fn with_first_week_size(mut self, size: u8) -> Self {
        assert!(
            (1..=7).contains(&size),
            "First week size must be between 1 and 7"
        );
        self.first_week_size = size;
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.history_capacity == 0 {
            return Err("History capacity must be greater than zero".to_string());
        }

        if !(1..=7).contains(&self.first_week_size) {
            return Err(format!(
                "First week size must be between 1 and 7, got {}",
                self.first_week_size
            ));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: EngineConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: EngineConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            aggregate_precision: 0,
            aggregates: Self::default_aggregates(),
            history_capacity: Self::default_history_capacity(),
            first_week_size: Self::default_first_week_size(),
            layout: LayoutConfig::default(),
        }
    }
}
