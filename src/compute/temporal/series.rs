use crate::config::{TimeLevel, TimeSeriesRecipe};
use crate::error::{GridError, Result};
use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use crate::compute::validation::validate_first_week_size;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO-8601 date or date-time. Values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// One timestamp per matrix row.
///
/// Rows whose timestamp could not be parsed hold `None` and fall back to
/// sequential numbering during indexing.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeSeries {
    timestamps: Vec<Option<DateTime<Utc>>>,
    level: TimeLevel,
    first_week_size: u8,
}

impl DateTimeSeries {
    pub fn new(timestamps: Vec<DateTime<Utc>>, level: TimeLevel, first_week_size: u8) -> Self {
        Self {
            timestamps: timestamps.into_iter().map(Some).collect(),
            level,
            first_week_size,
        }
    }

    /// Generate the series described by a data-source recipe.
    ///
    /// Hourly, daily and weekly steps add fixed durations; monthly and annual
    /// steps add calendar months.
    ///
    /// # Examples
    ///
    /// ```
    /// use chronogrid::compute::temporal::DateTimeSeries;
    /// use chronogrid::{TimeLevel, TimeSeriesRecipe};
    ///
    /// let recipe = TimeSeriesRecipe::new("2018-01-01T00:00:00Z", 8760, TimeLevel::Hourly);
    /// let series = DateTimeSeries::from_recipe(&recipe)?;
    /// assert_eq!(series.len(), 8760);
    /// # Ok::<(), chronogrid::GridError>(())
    /// ```
    pub fn from_recipe(recipe: &TimeSeriesRecipe) -> Result<Self> {
        validate_first_week_size(recipe.first_week_size)?;

        let start = parse_timestamp(&recipe.start_date).ok_or_else(|| {
            GridError::InvalidTimestamp(format!(
                "Unparsable series start date '{}'",
                recipe.start_date
            ))
        })?;

        let mut timestamps = Vec::with_capacity(recipe.steps);
        for step in 0..recipe.steps {
            let ts = step_timestamp(start, recipe.level, step).ok_or_else(|| {
                GridError::InvalidTimestamp(format!(
                    "Step {} from '{}' overflows the calendar",
                    step, recipe.start_date
                ))
            })?;
            timestamps.push(Some(ts));
        }

        Ok(Self {
            timestamps,
            level: recipe.level,
            first_week_size: recipe.first_week_size,
        })
    }

    /// Build from raw timestamp strings, keeping unparsable entries as gaps.
    pub fn parse<S: AsRef<str>>(values: &[S], level: TimeLevel, first_week_size: u8) -> Self {
        let mut invalid = 0usize;
        let timestamps = values
            .iter()
            .map(|value| {
                let parsed = parse_timestamp(value.as_ref());
                if parsed.is_none() {
                    invalid += 1;
                }
                parsed
            })
            .collect();

        if invalid > 0 {
            log::warn!(
                "{} of {} timestamps could not be parsed; those rows use sequential indexing",
                invalid,
                values.len()
            );
        }

        Self {
            timestamps,
            level,
            first_week_size,
        }
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&DateTime<Utc>> {
        self.timestamps.get(row).and_then(Option::as_ref)
    }

    pub fn level(&self) -> TimeLevel {
        self.level
    }

    pub fn first_week_size(&self) -> u8 {
        self.first_week_size
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&DateTime<Utc>>> {
        self.timestamps.iter().map(Option::as_ref)
    }
}

fn step_timestamp(start: DateTime<Utc>, level: TimeLevel, step: usize) -> Option<DateTime<Utc>> {
    let step = i64::try_from(step).ok()?;
    match level {
        TimeLevel::Hourly => start.checked_add_signed(TimeDelta::try_hours(step)?),
        TimeLevel::Daily => start.checked_add_signed(TimeDelta::try_days(step)?),
        TimeLevel::Weekly => start.checked_add_signed(TimeDelta::try_weeks(step)?),
        TimeLevel::Monthly => start.checked_add_months(Months::new(u32::try_from(step).ok()?)),
        TimeLevel::Annual => {
            let months = u32::try_from(step).ok()?.checked_mul(12)?;
            start.checked_add_months(Months::new(months))
        }
    }
}
