use chrono::TimeDelta;
use loadcast_core::{
    DisplayWindow, EmptyWindow, EnergySeries, LoadcastError, Selection, WindowRequest,
    WindowSelector, select_window,
};
use loadcast_mock::MockSeries;

fn series(len: usize) -> (MockSeries, EnergySeries) {
    let mock = MockSeries::new(len);
    let s = mock.build().unwrap();
    (mock, s)
}

fn window(sel: Selection) -> DisplayWindow {
    match sel {
        Selection::Window(w) => w,
        Selection::Empty(e) => panic!("unexpected empty window: {e:?}"),
    }
}

#[test]
fn worked_example_len_1000_start_500_horizon_60() {
    let (mock, s) = series(1000);
    let req = WindowRequest {
        start: mock.ts_at(500),
        horizon: 60,
    };
    let w = window(select_window(&s, &req).unwrap());
    assert_eq!((w.first_index(), w.last_index()), (500, 939));
    assert_eq!(w.len(), 440);
}

#[test]
fn horizon_zero_stops_at_the_boundary() {
    let (mock, s) = series(1000);
    let req = WindowRequest {
        start: mock.ts_at(0),
        horizon: 0,
    };
    let w = window(select_window(&s, &req).unwrap());
    assert_eq!(w.last_index(), 1000 - 121);
    assert!(s.get(w.last_index()).unwrap().actual_load.is_some());
    assert!(s.get(w.last_index() + 1).unwrap().actual_load.is_none());
}

#[test]
fn max_horizon_from_first_timestamp_spans_all_but_last() {
    let (mock, s) = series(1000);
    let req = WindowRequest {
        start: mock.ts_at(0),
        horizon: 119,
    };
    let w = window(select_window(&s, &req).unwrap());
    assert_eq!((w.first_index(), w.last_index()), (0, 998));
}

#[test]
fn start_between_hours_rounds_up_to_next_record() {
    let (mock, s) = series(400);
    let req = WindowRequest {
        start: mock.ts_at(100) + TimeDelta::minutes(30),
        horizon: 10,
    };
    let w = window(select_window(&s, &req).unwrap());
    assert_eq!(w.first_index(), 101);
}

#[test]
fn start_before_first_timestamp_clamps_to_zero() {
    let (mock, s) = series(400);
    let req = WindowRequest {
        start: mock.ts_at(0) - TimeDelta::days(30),
        horizon: 5,
    };
    let w = window(select_window(&s, &req).unwrap());
    assert_eq!(w.first_index(), 0);
    assert_eq!(w.last_index(), 400 - 1 - 115);
}

#[test]
fn start_inside_hidden_tail_is_empty() {
    let (mock, s) = series(1000);
    let req = WindowRequest {
        start: mock.ts_at(950),
        horizon: 0,
    };
    assert_eq!(
        select_window(&s, &req).unwrap(),
        Selection::Empty(EmptyWindow {
            first_index: 950,
            boundary_index: Some(879),
        })
    );

    // The same start becomes visible once the horizon reaches it.
    let req = WindowRequest {
        start: mock.ts_at(950),
        horizon: 71,
    };
    let w = window(select_window(&s, &req).unwrap());
    assert_eq!((w.first_index(), w.last_index()), (950, 950));
}

#[test]
fn start_on_last_timestamp_is_empty_not_error() {
    let (mock, s) = series(300);
    let req = WindowRequest {
        start: mock.ts_at(299),
        horizon: 119,
    };
    let sel = select_window(&s, &req).unwrap();
    assert!(sel.is_empty());
}

#[test]
fn start_after_last_timestamp_is_out_of_range() {
    let (mock, s) = series(300);
    let req = WindowRequest {
        start: mock.ts_at(300),
        horizon: 0,
    };
    match select_window(&s, &req) {
        Err(LoadcastError::OutOfRange { start, last }) => {
            assert_eq!(start, mock.ts_at(300));
            assert_eq!(last, mock.ts_at(299));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn series_shorter_than_tail_violates_invariant() {
    let (mock, s) = series(119);
    let req = WindowRequest {
        start: mock.ts_at(0),
        horizon: 0,
    };
    assert!(matches!(
        select_window(&s, &req),
        Err(LoadcastError::InternalInvariant(_))
    ));

    let empty = EnergySeries::new(Vec::new()).unwrap();
    assert!(matches!(
        select_window(&empty, &req),
        Err(LoadcastError::InternalInvariant(_))
    ));
}

#[test]
fn series_of_exactly_one_tail() {
    let (mock, s) = series(120);
    let at_first = |horizon| WindowRequest {
        start: mock.ts_at(0),
        horizon,
    };
    assert_eq!(
        select_window(&s, &at_first(0)).unwrap(),
        Selection::Empty(EmptyWindow {
            first_index: 0,
            boundary_index: None,
        })
    );
    let w = window(select_window(&s, &at_first(119)).unwrap());
    assert_eq!((w.first_index(), w.last_index()), (0, 118));
}

#[test]
fn horizon_past_tail_is_invalid() {
    let (mock, s) = series(500);
    let req = WindowRequest {
        start: mock.ts_at(0),
        horizon: 120,
    };
    assert!(matches!(
        select_window(&s, &req),
        Err(LoadcastError::InvalidRequest(_))
    ));
}

#[test]
fn custom_tail_length() {
    let mock = MockSeries::new(200).tail_len(24);
    let s = mock.build().unwrap();
    let selector = WindowSelector::new(24);
    let req = WindowRequest {
        start: mock.ts_at(10),
        horizon: 0,
    };
    let w = window(selector.select(&s, &req).unwrap());
    assert_eq!(w.last_index(), 200 - 1 - 24);

    let req = WindowRequest {
        start: mock.ts_at(10),
        horizon: 24,
    };
    assert!(selector.select(&s, &req).is_err());
}
