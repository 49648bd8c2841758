#![cfg(feature = "dataframe")]

use loadcast_core::{Selection, WindowRequest, align, select_window};
use loadcast_mock::MockSeries;

#[test]
fn aligned_window_to_dataframe_smoke() {
    let mock = MockSeries::new(400);
    let s = mock.build().unwrap();
    let req = WindowRequest {
        start: mock.ts_at(200),
        horizon: 30,
    };
    let Selection::Window(w) = select_window(&s, &req).unwrap() else {
        panic!("expected a window");
    };
    let aligned = align(&s, &w).unwrap();

    let df = aligned.to_dataframe().unwrap();
    assert_eq!(df.height(), w.len());
    assert_eq!(
        df.get_column_names_str(),
        vec!["ts", "actual_load", "forecast", "upper_bound", "lower_bound"]
    );
    // 30 forecast-only rows at the end have no actual load.
    assert_eq!(df.column("actual_load").unwrap().null_count(), 30);
}
