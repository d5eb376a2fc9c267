use super::DateTimeSeries;
use crate::config::TemporalDimension;
use chrono::{DateTime, Datelike, Timelike, Utc};

/// Week numbers never exceed this value.
pub const MAX_WEEK: i64 = 53;

/// Week number of a day of the year.
///
/// Days `1..=first_week_size` form week 1; every following block of seven
/// days is the next week. The result is capped at [`MAX_WEEK`].
///
/// # Examples
///
/// ```
/// use chronogrid::compute::temporal::week_of_year;
///
/// assert_eq!(week_of_year(1, 7), 1);
/// assert_eq!(week_of_year(8, 7), 2);
/// assert_eq!(week_of_year(3, 2), 2);
/// assert_eq!(week_of_year(366, 1), 53);
/// ```
pub fn week_of_year(day_of_year: u32, first_week_size: u8) -> i64 {
    let first = u32::from(first_week_size.clamp(1, 7));
    let week = if day_of_year <= first {
        1
    } else {
        1 + (day_of_year - first).div_ceil(7)
    };
    i64::from(week).min(MAX_WEEK)
}

/// Value of `dimension` at a UTC timestamp.
pub fn derive_from_timestamp(
    timestamp: &DateTime<Utc>,
    dimension: TemporalDimension,
    first_week_size: u8,
) -> i64 {
    match dimension {
        TemporalDimension::Month => i64::from(timestamp.month()),
        TemporalDimension::Weekday => i64::from(timestamp.weekday().number_from_monday()),
        TemporalDimension::DayOfMonth => i64::from(timestamp.day()),
        TemporalDimension::DayOfYear => i64::from(timestamp.ordinal()),
        TemporalDimension::HourOfDay => i64::from(timestamp.hour()),
        TemporalDimension::HourOfYear => {
            i64::from(timestamp.ordinal0()) * 24 + i64::from(timestamp.hour()) + 1
        }
        TemporalDimension::Week => week_of_year(timestamp.ordinal(), first_week_size),
    }
}

/// Derives temporal dimension values for matrix rows.
///
/// Without a series, for rows whose timestamp is missing, and for dimensions
/// the series level cannot express, the value is the 1-based row number.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalIndexer<'a> {
    series: Option<&'a DateTimeSeries>,
}

impl<'a> TemporalIndexer<'a> {
    pub fn new(series: Option<&'a DateTimeSeries>) -> Self {
        Self { series }
    }

    /// Indexer for a plain table with no timestamps.
    pub fn sequential() -> Self {
        Self { series: None }
    }

    pub fn series(&self) -> Option<&'a DateTimeSeries> {
        self.series
    }

    /// Whether `dimension` resolves to calendar values rather than row numbers.
    pub fn is_temporal(&self, dimension: TemporalDimension) -> bool {
        self.series
            .is_some_and(|series| series.level().supports(dimension))
    }

    /// Value of `dimension` for the 0-based `row`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronogrid::compute::temporal::{DateTimeSeries, TemporalIndexer};
    /// use chronogrid::{TemporalDimension, TimeLevel, TimeSeriesRecipe};
    ///
    /// let recipe = TimeSeriesRecipe::new("2024-01-01T00:00:00Z", 8784, TimeLevel::Hourly);
    /// let series = DateTimeSeries::from_recipe(&recipe)?;
    /// let indexer = TemporalIndexer::new(Some(&series));
    /// assert_eq!(indexer.derive_value(0, TemporalDimension::HourOfYear), 1);
    /// assert_eq!(indexer.derive_value(8783, TemporalDimension::HourOfYear), 8784);
    /// assert_eq!(TemporalIndexer::sequential().derive_value(41, TemporalDimension::Month), 42);
    /// # Ok::<(), chronogrid::GridError>(())
    /// ```
    pub fn derive_value(&self, row: usize, dimension: TemporalDimension) -> i64 {
        let fallback = row as i64 + 1;
        let Some(series) = self.series else {
            return fallback;
        };
        if !series.level().supports(dimension) {
            return fallback;
        }
        match series.get(row) {
            Some(timestamp) => derive_from_timestamp(timestamp, dimension, series.first_week_size()),
            None => fallback,
        }
    }

    /// Values of `dimension` for rows `0..rows`.
    pub fn values(&self, rows: usize, dimension: TemporalDimension) -> Vec<i64> {
        (0..rows)
            .map(|row| self.derive_value(row, dimension))
            .collect()
    }

    /// Smallest and largest value of `dimension` over `rows` rows.
    ///
    /// An empty matrix yields the dimension's canonical range.
    pub fn value_bounds(&self, rows: usize, dimension: TemporalDimension) -> (i64, i64) {
        let bounds = (0..rows)
            .map(|row| self.derive_value(row, dimension))
            .fold(None, |acc: Option<(i64, i64)>, value| match acc {
                Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
                None => Some((value, value)),
            });

        bounds.unwrap_or_else(|| {
            let leap = self
                .series
                .and_then(|series| series.iter().flatten().next())
                .is_some_and(|ts| is_leap_year(ts.year()));
            dimension.canonical_range(leap)
        })
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
