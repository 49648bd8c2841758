use loadcast::chart::{LAYOUT, TITLE, TRACES, Y_AXIS_TITLE, trace_style};
use loadcast::{ChartState, Dashboard, LoadcastConfig, SeriesRole, Update, WindowRequest};
use loadcast_mock::MockSeries;

fn figure_state() -> ChartState {
    let mock = MockSeries::new(300);
    let store = mock.store(&LoadcastConfig::default()).unwrap();
    let d = Dashboard::builder().store(store).build().unwrap();
    d.render(&WindowRequest {
        start: mock.ts_at(150),
        horizon: 5,
    })
}

#[test]
fn traces_follow_draw_order_and_styles() {
    let roles: Vec<_> = TRACES.iter().map(|t| t.role).collect();
    assert_eq!(roles, SeriesRole::ALL.to_vec());

    let actual = trace_style(SeriesRole::Actual);
    assert_eq!((actual.name, actual.color), ("Demanda energética", Some("#188463")));
    assert!(actual.show_legend);

    let forecast = trace_style(SeriesRole::Forecast);
    assert_eq!((forecast.name, forecast.color), ("Proyección", Some("#bbffeb")));

    let upper = trace_style(SeriesRole::UpperBound);
    assert_eq!((upper.name, upper.line_width, upper.show_legend), ("Upper Bound", Some(0), false));
    assert_eq!(upper.fill_to_previous, None);

    let lower = trace_style(SeriesRole::LowerBound);
    assert_eq!(lower.name, "Lower Bound");
    assert_eq!(lower.fill_to_previous, Some("rgba(242, 255, 251, 0.3)"));
    assert!(!lower.show_legend);
}

#[test]
fn figure_carries_titles_and_aligned_values() {
    let state = figure_state();
    let fig = state.figure().unwrap();
    assert_eq!(fig.title(), TITLE);
    assert_eq!(fig.y_axis_title(), Y_AXIS_TITLE);
    assert_eq!(fig.traces(), &TRACES);
    assert_eq!(fig.layout(), &LAYOUT);
    // 150 ..= 300 - 1 - 115
    assert_eq!(fig.len(), 35);
    assert!(!fig.is_empty());
    for role in SeriesRole::ALL {
        assert_eq!(fig.values(role), fig.data().values(role));
        assert_eq!(fig.values(role).len(), fig.timestamps().len());
    }
}

#[test]
fn layout_matches_dashboard_theme() {
    assert_eq!(
        (LAYOUT.legend_orientation, LAYOUT.legend_x_anchor, LAYOUT.legend_y_anchor),
        ("h", "right", "bottom")
    );
    assert!(LAYOUT.legend_y > 1.0);
    assert_eq!(LAYOUT.hover_mode, "x");
    assert_eq!(LAYOUT.paper_background, "rgba(0,0,0,0)");
    assert_eq!(LAYOUT.plot_background, "rgba(0,0,0,0)");
    assert_eq!(LAYOUT.font_color, "#2cfec1");
    assert_eq!((LAYOUT.grid_color, LAYOUT.grid_width), ("#7C7C7C", 0.25));
}

#[test]
fn chart_state_serializes_for_renderer() {
    let json = serde_json::to_value(figure_state()).unwrap();
    assert_eq!(json["kind"], "chart");
    let fig = &json["value"];
    assert_eq!(fig["title"], TITLE);
    assert_eq!(fig["traces"][3]["fill_to_previous"], "rgba(242, 255, 251, 0.3)");
    assert_eq!(fig["layout"]["hover_mode"], "x");
    assert_eq!(fig["layout"]["font_color"], "#2cfec1");
    assert_eq!(fig["data"]["timestamps"].as_array().map(Vec::len), Some(35));

    let unchanged = serde_json::to_value(Update::Unchanged).unwrap();
    assert_eq!(unchanged["kind"], "unchanged");
}
