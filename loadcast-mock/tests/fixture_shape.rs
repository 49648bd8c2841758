use chrono::{DateTime, TimeDelta};
use loadcast_core::{ColumnMap, LoadcastConfig, SeriesStore};
use loadcast_mock::{MockSeries, default_start};

#[test]
fn default_start_is_new_year_2020() {
    assert_eq!(default_start(), DateTime::from_timestamp(1_577_836_800, 0).unwrap());
}

#[test]
fn tail_has_no_actuals_and_a_band() {
    let mock = MockSeries::new(500);
    let series = mock.build().unwrap();
    assert_eq!(series.len(), 500);
    assert_eq!(mock.boundary(), 380);

    for r in &series.records()[380..] {
        assert!(r.actual_load.is_none());
        let (f, up, lo) = (r.forecast.unwrap(), r.upper_bound.unwrap(), r.lower_bound.unwrap());
        assert!(lo < f && f < up);
    }
    for r in &series.records()[..380] {
        assert!(r.actual_load.is_some());
    }
}

#[test]
fn fitted_history_precedes_boundary() {
    let series = MockSeries::new(300).fitted_history(10).build().unwrap();
    let boundary = 300 - 120;
    assert!(series.get(boundary - 11).unwrap().forecast.is_none());
    assert!(series.get(boundary - 10).unwrap().forecast.is_some());
    assert!(series.get(boundary - 1).unwrap().upper_bound.is_some());
}

#[test]
fn records_are_hourly_from_start() {
    let start = default_start() + TimeDelta::days(3);
    let mock = MockSeries::new(130).start(start);
    let series = mock.build().unwrap();
    assert_eq!(series.first_ts(), Some(start));
    assert_eq!(series.last_ts(), Some(start + TimeDelta::hours(129)));
    assert_eq!(mock.ts_at(5), start + TimeDelta::hours(5));
}

#[test]
fn csv_rendering_loads_back_identically() {
    let mock = MockSeries::new(200).tail_len(48);
    let cfg = LoadcastConfig {
        forecast_tail_len: 48,
        ..LoadcastConfig::default()
    };
    let csv = mock.to_csv(&ColumnMap::default()).unwrap();
    assert!(csv.starts_with(
        "time,AT_load_actual_entsoe_transparency,forecast,Upper bound,Lower bound"
    ));

    let store = SeriesStore::from_reader(csv.as_bytes(), &cfg).unwrap();
    assert_eq!(store.series(), &mock.build().unwrap());
}

#[test]
fn short_series_is_rejected_by_store() {
    let err = MockSeries::new(119).store(&LoadcastConfig::default()).unwrap_err();
    assert!(err.is_fatal());
}
