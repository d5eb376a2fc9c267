use chronogrid::compute::filter::{combine, select};
use chronogrid::coordinator::recompute;
use chronogrid::{
    AxisFilter, DateTimeSeries, EngineConfig, FilterOperator, FilterState, MatrixData,
    MatrixSession, OperationKind, PreviewState, SessionBuilder, TemporalDimension,
    TemporalIndexer, TimeLevel, TimeSeriesRecipe,
};
use std::sync::{Arc, Mutex};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Filter state exactly as the grid UI serializes it
#[test]
fn test_filter_state_from_ui_json() {
    let json = r#"{
        "active": true,
        "columnsFilter": { "type": "range", "range": { "min": 1, "max": 2 } },
        "rowsFilters": [
            { "id": "7f1c2f4e-5d1b-4b8e-9a59-2b6f0c3d8e11", "indexingType": "month",
              "type": "list", "list": [3], "operator": "equals" },
            { "id": "0b7d4a51-3f0e-4c55-8f3c-6f2f9e1b7a20", "indexingType": "dayOfMonth",
              "type": "range", "range": { "min": 1, "max": 7 } }
        ],
        "operation": { "type": "mul", "value": 1.5 }
    }"#;

    let state: FilterState = serde_json::from_str(json).unwrap();
    assert!(state.active);
    assert_eq!(state.rows_filters.len(), 2);
    assert_eq!(state.rows_filters[1].indexing_type, TemporalDimension::DayOfMonth);
    assert_eq!(state.operation.kind, OperationKind::Multiply);

    let series =
        DateTimeSeries::from_recipe(&TimeSeriesRecipe::new("2023-01-01", 365, TimeLevel::Daily))
            .unwrap();
    let rows = combine(&state.rows_filters, 365, &TemporalIndexer::new(Some(&series)));
    // March 1..=7
    assert_eq!(rows, (59..66).collect::<Vec<_>>());
}

#[test]
fn test_malformed_filters_select_nothing() {
    let cases = [
        r#"{ "type": "range" }"#,
        r#"{ "type": "list", "list": [1, 2], "operator": "between" }"#,
        r#"{ "type": "polygon", "points": [] }"#,
        r#"{ "type": "list" }"#,
        r#"{ "type": "range", "range": { "min": 3 } }"#,
        r#"{ "type": "range", "range": { "max": 3 } }"#,
        r#"{ "type": "range", "range": null }"#,
        r#"{ "type": "list", "list": null, "operator": "gt" }"#,
    ];

    for case in cases {
        let filter: AxisFilter = serde_json::from_str(case).unwrap();
        assert!(select(20, &filter).is_empty(), "{} selected rows", case);
    }

    let unknown: AxisFilter = serde_json::from_str(cases[1]).unwrap();
    assert_eq!(
        unknown,
        AxisFilter::list_with(vec![1, 2], FilterOperator::Unknown)
    );
}

/// An incomplete row filter empties the selection without rejecting the state
#[test]
fn test_incomplete_filters_inside_state() {
    let json = r#"{
        "active": true,
        "columnsFilter": { "type": "range", "range": { "min": 1 } },
        "rowsFilters": [
            { "indexingType": "month", "type": "range", "range": { "min": 1 } },
            { "indexingType": "weekday", "type": "list", "list": null }
        ]
    }"#;

    let state: FilterState = serde_json::from_str(json).unwrap();
    assert_eq!(state.rows_filters.len(), 2);

    let criteria = recompute(&state, 12, 3, None);
    assert!(criteria.columns_indices.is_empty());
    assert!(criteria.rows_indices.is_empty());
    assert!(criteria.is_empty());
}

#[test]
fn test_list_operators() {
    let gt = AxisFilter::list_with(vec![7], FilterOperator::Gt);
    assert_eq!(select(10, &gt), vec![7, 8, 9]);

    let lte = AxisFilter::list_with(vec![3], FilterOperator::Lte);
    assert_eq!(select(10, &lte), vec![0, 1, 2]);

    // Upper-bounded operators use the largest listed value
    let lt = AxisFilter::list_with(vec![2, 5], FilterOperator::Lt);
    assert_eq!(select(10, &lt), vec![0, 1, 2, 3]);

    let range = AxisFilter::list_with(vec![9, 4, 6], FilterOperator::Range);
    assert_eq!(select(10, &range), vec![3, 4, 5, 6, 7, 8]);

    // A single value degrades to equality
    let single = AxisFilter::list_with(vec![5], FilterOperator::Range);
    assert_eq!(select(10, &single), vec![4]);
}

#[test]
fn test_out_of_bounds_values_dropped() {
    assert_eq!(select(3, &AxisFilter::list(vec![0, 2, 4, -1])), vec![1]);
    assert_eq!(select(3, &AxisFilter::range(-5, 100)), vec![0, 1, 2]);
    assert!(select(0, &AxisFilter::range(1, 1)).is_empty());
}

#[test]
fn test_first_week_size() {
    let weeks = |size| {
        let recipe =
            TimeSeriesRecipe::new("2023-01-01", 10, TimeLevel::Daily).with_first_week_size(size);
        let series = DateTimeSeries::from_recipe(&recipe).unwrap();
        TemporalIndexer::new(Some(&series)).values(10, TemporalDimension::Week)
    };

    assert_eq!(weeks(7), vec![1, 1, 1, 1, 1, 1, 1, 2, 2, 2]);
    assert_eq!(weeks(1), vec![1, 2, 2, 2, 2, 2, 2, 2, 3, 3]);
    assert_eq!(weeks(3), vec![1, 1, 1, 2, 2, 2, 2, 2, 2, 2]);
}

#[test]
fn test_invalid_first_week_size_rejected() {
    let recipe = TimeSeriesRecipe::new("2023-01-01", 3, TimeLevel::Daily).with_first_week_size(0);
    assert!(DateTimeSeries::from_recipe(&recipe).is_err());
}

#[test]
fn test_coarse_levels_fall_back_to_row_index() {
    let monthly =
        DateTimeSeries::from_recipe(&TimeSeriesRecipe::new("2023-06-01", 12, TimeLevel::Monthly))
            .unwrap();
    let indexer = TemporalIndexer::new(Some(&monthly));

    assert_eq!(
        indexer.values(12, TemporalDimension::Month),
        vec![6, 7, 8, 9, 10, 11, 12, 1, 2, 3, 4, 5]
    );
    assert_eq!(
        indexer.values(3, TemporalDimension::Weekday),
        vec![1, 2, 3]
    );

    let annual =
        DateTimeSeries::from_recipe(&TimeSeriesRecipe::new("2020-03-01", 4, TimeLevel::Annual))
            .unwrap();
    let indexer = TemporalIndexer::new(Some(&annual));
    assert_eq!(indexer.values(4, TemporalDimension::Month), vec![1, 2, 3, 4]);
}

#[test]
fn test_unparsable_timestamps_fall_back_per_row() {
    init_logging();
    let mut session = MatrixSession::new();
    session
        .load_with_timestamps(
            MatrixData::new(vec![vec![1.0]; 3]),
            &["2023-05-01T00:00:00Z", "garbage", "2023-05-03T00:00:00Z"],
            TimeLevel::Daily,
        )
        .unwrap();

    let indexer = TemporalIndexer::new(session.series());
    assert_eq!(
        indexer.values(3, TemporalDimension::DayOfMonth),
        vec![1, 2, 3]
    );
    assert_eq!(indexer.values(3, TemporalDimension::Month), vec![5, 2, 5]);
}

#[test]
fn test_session_preview_notifications() {
    init_logging();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut session = SessionBuilder::new()
        .data(MatrixData::new(vec![vec![0.0; 3]; 30]))
        .recipe(TimeSeriesRecipe::new("2024-02-01", 30, TimeLevel::Daily))
        .build()
        .unwrap();

    let sink = Arc::clone(&seen);
    session.subscribe(move |criteria| {
        sink.lock().unwrap().push(criteria.rows_indices.len());
    });

    let mut state = session.filter_state().clone();
    state.active = true;
    state.rows_filters = vec![chronogrid::RowFilter::new(
        TemporalDimension::Month,
        AxisFilter::list(vec![3]),
    )];
    assert!(session.set_filter_state(state));
    assert_eq!(session.toggle_preview(), PreviewState::ActivePreview);
    assert_eq!(session.highlighted().map(|c| c.rows_indices.clone()), Some(vec![29]));

    assert!(session.set_filter_active(false));
    assert!(session.highlighted().is_none());
    assert_eq!(session.criteria().rows_indices.len(), 30);

    assert_eq!(*seen.lock().unwrap(), vec![1, 30]);
}

#[test]
fn test_config_json_round_trip() {
    let config = EngineConfig::default()
        .with_aggregate_precision(2)
        .with_history_capacity(5);
    let json = config.to_json().unwrap();
    assert_eq!(EngineConfig::from_json(&json).unwrap(), config);

    assert!(EngineConfig::from_json(r#"{ "history_capacity": 0 }"#).is_err());
    assert!(EngineConfig::from_json(r#"{ "unknown_field": 1 }"#).is_err());

    let partial = EngineConfig::from_json(r#"{ "first_week_size": 4 }"#).unwrap();
    assert_eq!(partial.first_week_size, 4);
    assert_eq!(partial.history_capacity, 100);
}

#[cfg(feature = "toml")]
#[test]
fn test_config_toml() {
    let config = EngineConfig::from_toml(
        r#"
        aggregate_precision = 1
        aggregates = ["avg", "total"]

        [layout]
        date_column = false
        "#,
    )
    .unwrap();
    assert_eq!(config.aggregates.len(), 2);
    assert!(!config.layout.date_column);
    assert!(config.layout.row_header);
}
