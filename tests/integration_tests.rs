use chrono::{Datelike, TimeZone, Utc, Weekday};
use chronogrid::compute::aggregate::compute;
use chronogrid::compute::filter::{combine, select};
use chronogrid::compute::operation::apply_operation;
use chronogrid::compute::temporal::derive_from_timestamp;
use chronogrid::{
    AggregateType, AxisFilter, ColumnDescriptor, ColumnMapper, DateTimeSeries, FilterCriteria,
    FilterOperator, Matrix, MatrixData, MatrixSession, Operation, OperationKind, RowFilter,
    TemporalDimension, TemporalIndexer, TimeLevel, TimeSeriesRecipe,
};
use std::borrow::Cow;

fn daily_2023() -> DateTimeSeries {
    let recipe = TimeSeriesRecipe::new("2023-01-01", 365, TimeLevel::Daily);
    DateTimeSeries::from_recipe(&recipe).unwrap()
}

fn row_filter(dimension: TemporalDimension, values: Vec<i64>) -> RowFilter {
    RowFilter::new(dimension, AxisFilter::list(values))
}

#[test]
fn test_range_inclusivity() {
    for n in 0..12usize {
        for min in -2..14i64 {
            for max in min..14i64 {
                let expected: Vec<usize> = (0..n)
                    .filter(|&i| min <= i as i64 + 1 && i as i64 + 1 <= max)
                    .collect();
                assert_eq!(
                    select(n, &AxisFilter::range(min, max)),
                    expected,
                    "n={} range={}..={}",
                    n,
                    min,
                    max
                );
            }
        }
    }
}

#[test]
fn test_empty_list_selects_nothing() {
    let operators = [
        FilterOperator::Equals,
        FilterOperator::Gt,
        FilterOperator::Gte,
        FilterOperator::Lt,
        FilterOperator::Lte,
        FilterOperator::Range,
        FilterOperator::Unknown,
    ];
    for operator in operators {
        for n in [0, 1, 10, 8760] {
            assert!(select(n, &AxisFilter::list_with(Vec::new(), operator)).is_empty());
        }
    }
}

#[test]
fn test_or_within_dimension() {
    let indexer = TemporalIndexer::sequential();
    let first = row_filter(TemporalDimension::DayOfYear, vec![1, 2, 7]);
    let second = row_filter(TemporalDimension::DayOfYear, vec![4, 9]);

    let union = combine(&[first.clone(), second.clone()], 10, &indexer);
    assert_eq!(union, vec![0, 1, 3, 6, 8]);

    // Overlapping lists still produce each row once
    let overlap = row_filter(TemporalDimension::DayOfYear, vec![2, 4]);
    assert_eq!(combine(&[first, second, overlap], 10, &indexer), union);
}

#[test]
fn test_and_across_dimensions() {
    let series = daily_2023();
    let indexer = TemporalIndexer::new(Some(&series));
    let month = RowFilter::new(TemporalDimension::Month, AxisFilter::range(2, 2));
    let day = RowFilter::new(TemporalDimension::DayOfMonth, AxisFilter::range(10, 40));

    let only_month = combine(std::slice::from_ref(&month), 365, &indexer);
    let only_day = combine(std::slice::from_ref(&day), 365, &indexer);
    let both = combine(&[month, day], 365, &indexer);

    let expected: Vec<usize> = only_month
        .iter()
        .copied()
        .filter(|row| only_day.binary_search(row).is_ok())
        .collect();
    assert_eq!(both, expected);
    // February 10..=28
    assert_eq!(both.len(), 19);
}

#[test]
fn test_hour_of_year_range() {
    let dim = TemporalDimension::HourOfYear;
    let at = |y, m, d, h| Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap();

    assert_eq!(derive_from_timestamp(&at(2024, 1, 1, 0), dim, 7), 1);
    assert_eq!(derive_from_timestamp(&at(2024, 1, 1, 23), dim, 7), 24);
    assert_eq!(derive_from_timestamp(&at(2024, 12, 31, 23), dim, 7), 8784);
    assert_eq!(derive_from_timestamp(&at(2023, 12, 31, 23), dim, 7), 8760);
}

#[test]
fn test_hourly_series_across_daylight_saving_changes() {
    // US and EU spring/fall transitions in 2024
    let starts = [
        "2024-03-09T12:00:00Z",
        "2024-03-10T00:00:00Z",
        "2024-03-30T22:00:00Z",
        "2024-10-26T20:00:00Z",
        "2024-11-03T01:00:00Z",
    ];

    for start in starts {
        let recipe = TimeSeriesRecipe::new(start, 24, TimeLevel::Hourly);
        let series = DateTimeSeries::from_recipe(&recipe).unwrap();
        let indexer = TemporalIndexer::new(Some(&series));

        let hours = indexer.values(24, TemporalDimension::HourOfYear);
        for pair in hours.windows(2) {
            assert_eq!(pair[1], pair[0] + 1, "gap or duplicate after {}", start);
        }

        let of_day = indexer.values(24, TemporalDimension::HourOfDay);
        for pair in of_day.windows(2) {
            assert_eq!(pair[1], (pair[0] + 1) % 24, "hour of day jump after {}", start);
        }
    }
}

#[test]
fn test_division_by_zero_leaves_cells() {
    let matrix = Matrix::try_from_rows(&[vec![1.0, -2.0], vec![0.0, 4.5]]).unwrap();
    let criteria = FilterCriteria::everything(2, 2);
    let result = apply_operation(&matrix, &criteria, &Operation::new(OperationKind::Divide, 0.0));

    assert!(matches!(result, Cow::Borrowed(_)));
    assert_eq!(result.as_ref(), &matrix);
}

#[test]
fn test_column_mapping_round_trip() {
    let layouts = [
        vec![
            ColumnDescriptor::text(""),
            ColumnDescriptor::datetime("Date"),
            ColumnDescriptor::number("A"),
            ColumnDescriptor::number("B"),
            ColumnDescriptor::aggregate(AggregateType::Avg),
        ],
        vec![
            ColumnDescriptor::number("A"),
            ColumnDescriptor::aggregate(AggregateType::Min),
            ColumnDescriptor::number("B"),
            ColumnDescriptor::text("note"),
            ColumnDescriptor::number("C"),
        ],
        Vec::new(),
    ];

    for columns in layouts {
        let mapper = ColumnMapper::new(&columns);
        for (grid, column) in columns.iter().enumerate() {
            match mapper.grid_to_data(grid) {
                Some(data) => {
                    assert!(column.is_data());
                    assert_eq!(mapper.data_to_grid(data), Some(grid));
                }
                None => assert!(!column.is_data()),
            }
        }
    }
}

#[test]
fn test_aggregate_correctness() {
    let matrix =
        Matrix::try_from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]])
            .unwrap();
    let aggregates = compute(&matrix, &AggregateType::ALL, 0);

    assert_eq!(aggregates.min, vec![1.0, 4.0, 7.0]);
    assert_eq!(aggregates.max, vec![3.0, 6.0, 9.0]);
    assert_eq!(aggregates.avg, vec![2.0, 5.0, 8.0]);
    assert_eq!(aggregates.total, vec![6.0, 15.0, 24.0]);
}

#[test]
fn test_january_mondays() {
    let series = daily_2023();
    let indexer = TemporalIndexer::new(Some(&series));
    let filters = [
        row_filter(TemporalDimension::Month, vec![1]),
        row_filter(TemporalDimension::Weekday, vec![1]),
    ];

    let rows = combine(&filters, 365, &indexer);
    assert!((4..=5).contains(&rows.len()));
    for row in rows {
        let date = series.get(row).unwrap();
        assert_eq!(date.month(), 1);
        assert_eq!(date.weekday(), Weekday::Mon);
    }
}

#[test]
fn test_march_or_september() {
    let series = daily_2023();
    let indexer = TemporalIndexer::new(Some(&series));
    let filters = [
        row_filter(TemporalDimension::Month, vec![3]),
        row_filter(TemporalDimension::Month, vec![9]),
    ];

    let rows = combine(&filters, 365, &indexer);
    assert_eq!(rows.len(), 61);
    assert!(rows.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_session_end_to_end() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut session = MatrixSession::new();
    let data = MatrixData::new((1..=365).map(|day| vec![day as f64, 1.0]).collect())
        .with_columns(vec!["load".into(), "flag".into()]);
    session
        .load_with_recipe(data, &TimeSeriesRecipe::new("2023-01-01", 365, TimeLevel::Daily))
        .unwrap();

    let mut state = session.filter_state().clone();
    state.active = true;
    state.columns_filter = AxisFilter::range(2, 2);
    state.rows_filters = vec![row_filter(TemporalDimension::Weekday, vec![6, 7])];
    state.operation = Operation::new(OperationKind::Assign, 0.0);
    session.set_filter_state(state);

    // 2023 has 53 Sundays and 52 Saturdays
    assert_eq!(session.criteria().rows_indices.len(), 105);
    assert!(session.apply_filter_operation().unwrap());

    let flags: f64 = (0..365).map(|row| session.matrix().get(row, 1).unwrap()).sum();
    assert_eq!(flags, 260.0);
    // 2023-01-01 was a Sunday
    assert_eq!(session.aggregates().total[0], 1.0);
    assert_eq!(session.aggregates().total[1], 3.0);

    assert!(session.undo().unwrap());
    assert_eq!(session.aggregates().total[0], 2.0);
}
