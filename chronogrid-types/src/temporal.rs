use serde::{Deserialize, Serialize};

/// Calendar-derived coordinate system used to index matrix rows.
///
/// Every dimension is 1-based except [`TemporalDimension::HourOfDay`], which
/// runs 0..=23. `HourOfYear` stays 1-based (`(day_of_year - 1) * 24 + hour + 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemporalDimension {
    Month,
    Weekday,
    DayOfMonth,
    DayOfYear,
    HourOfDay,
    HourOfYear,
    Week,
}

impl TemporalDimension {
    pub const ALL: [TemporalDimension; 7] = [
        TemporalDimension::Month,
        TemporalDimension::Weekday,
        TemporalDimension::DayOfMonth,
        TemporalDimension::DayOfYear,
        TemporalDimension::HourOfDay,
        TemporalDimension::HourOfYear,
        TemporalDimension::Week,
    ];

    /// Inclusive bounds of the dimension, used when no data is available.
    pub const fn canonical_range(self, leap_year: bool) -> (i64, i64) {
        match self {
            TemporalDimension::Month => (1, 12),
            TemporalDimension::Weekday => (1, 7),
            TemporalDimension::DayOfMonth => (1, 31),
            TemporalDimension::DayOfYear => (1, if leap_year { 366 } else { 365 }),
            TemporalDimension::HourOfDay => (0, 23),
            TemporalDimension::HourOfYear => (1, if leap_year { 8784 } else { 8760 }),
            TemporalDimension::Week => (1, 53),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TemporalDimension::Month => "month",
            TemporalDimension::Weekday => "weekday",
            TemporalDimension::DayOfMonth => "dayOfMonth",
            TemporalDimension::DayOfYear => "dayOfYear",
            TemporalDimension::HourOfDay => "hourOfDay",
            TemporalDimension::HourOfYear => "hourOfYear",
            TemporalDimension::Week => "week",
        }
    }

    /// Coarsest series level at which this dimension carries information.
    const fn required_level(self) -> TimeLevel {
        match self {
            TemporalDimension::Month => TimeLevel::Monthly,
            TemporalDimension::Week => TimeLevel::Weekly,
            TemporalDimension::Weekday
            | TemporalDimension::DayOfMonth
            | TemporalDimension::DayOfYear => TimeLevel::Daily,
            TemporalDimension::HourOfDay | TemporalDimension::HourOfYear => TimeLevel::Hourly,
        }
    }
}

impl std::fmt::Display for TemporalDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling frequency of a time series.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeLevel {
    Annual,
    Monthly,
    Weekly,
    Daily,
    #[default]
    Hourly,
}

impl TimeLevel {
    /// Whether timestamps at this level carry meaningful values for `dimension`.
    ///
    /// Non-meaningful dimensions fall back to sequential row numbering.
    pub const fn supports(self, dimension: TemporalDimension) -> bool {
        self as u8 >= dimension.required_level() as u8
    }
}

pub const DEFAULT_FIRST_WEEK_SIZE: u8 = 7;

/// Recipe from which the data source's timestamp series is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesRecipe {
    /// ISO-8601 date or date-time of the first row, interpreted in UTC.
    pub start_date: String,
    pub steps: usize,
    /// Number of days in the first week of the year (1..=7).
    #[serde(default = "TimeSeriesRecipe::default_first_week_size")]
    pub first_week_size: u8,
    pub level: TimeLevel,
}

impl TimeSeriesRecipe {
    pub fn new(start_date: impl Into<String>, steps: usize, level: TimeLevel) -> Self {
        Self {
            start_date: start_date.into(),
            steps,
            first_week_size: DEFAULT_FIRST_WEEK_SIZE,
            level,
        }
    }

    pub fn with_first_week_size(mut self, first_week_size: u8) -> Self {
        self.first_week_size = first_week_size;
        self
    }

    const fn default_first_week_size() -> u8 {
        DEFAULT_FIRST_WEEK_SIZE
    }
}
