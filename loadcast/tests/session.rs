use chrono::Timelike;
use loadcast::{
    ChartState, Dashboard, DisplaySession, LoadcastConfig, LoadcastError, RawRequest, Update,
};
use loadcast_mock::MockSeries;
use proptest::prelude::*;

fn setup() -> (MockSeries, Dashboard) {
    let mock = MockSeries::new(600);
    let store = mock.store(&LoadcastConfig::default()).unwrap();
    (mock, Dashboard::builder().store(store).build().unwrap())
}

fn raw(mock: &MockSeries, index: usize, horizon: i64) -> RawRequest {
    let ts = mock.ts_at(index);
    RawRequest::new()
        .date(ts.date_naive())
        .hour(i64::from(ts.hour()))
        .horizon(horizon)
}

#[test]
fn fresh_session_shows_nothing() {
    let mut s = DisplaySession::new();
    assert!(s.current().is_none());
    assert!(s.apply(Update::Unchanged).is_none());
    assert!(s.apply(Update::Rejected(LoadcastError::invalid_request("x"))).is_none());
    assert_eq!(s.rejected(), 1);
}

#[test]
fn invalid_input_keeps_previous_chart() {
    let (mock, d) = setup();
    let mut s = DisplaySession::new();

    let first = s.apply(d.update(&raw(&mock, 100, 10))).cloned().unwrap();
    assert!(matches!(first, ChartState::Chart(_)));

    // Partial input.
    assert_eq!(s.apply(d.update(&RawRequest::new().horizon(5))), Some(&first));
    // Horizon out of range.
    assert_eq!(s.apply(d.update(&raw(&mock, 100, 500))), Some(&first));
    assert_eq!(s.rejected(), 1);
    assert!(s.last_rejection().is_some());

    // A valid request replaces the display and clears the rejection.
    let next = s.apply(d.update(&raw(&mock, 200, 10))).cloned().unwrap();
    assert_ne!(next, first);
    assert!(s.last_rejection().is_none());
}

#[test]
fn empty_and_error_states_replace_the_chart() {
    let (mock, d) = setup();
    let mut s = DisplaySession::new();
    s.apply(d.update(&raw(&mock, 100, 10)));

    let empty = s.apply(d.update(&raw(&mock, 590, 0))).unwrap();
    assert!(matches!(empty, ChartState::Empty(_)));

    let req = loadcast::WindowRequest {
        start: mock.ts_at(600),
        horizon: 0,
    };
    let err = s.apply(Update::Render(d.render(&req))).unwrap();
    assert!(matches!(err, ChartState::Error(LoadcastError::OutOfRange { .. })));
}

proptest! {
    #[test]
    fn display_only_changes_on_render(
        ops in proptest::collection::vec((0usize..700, -5i64..130, any::<bool>()), 1..30),
    ) {
        let (mock, d) = setup();
        let mut s = DisplaySession::new();
        let mut expected: Option<ChartState> = None;

        for (index, horizon, complete) in ops {
            let r = if complete {
                raw(&mock, index, horizon)
            } else {
                RawRequest::new().horizon(horizon)
            };
            let update = d.update(&r);
            if let Update::Render(state) = &update {
                expected = Some(state.clone());
            }
            let shown = s.apply(update).cloned();
            prop_assert_eq!(shown, expected.clone());
        }
    }
}
