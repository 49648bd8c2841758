use loadcast::{ChartState, RawRequest, SeriesRole, Update};
use loadcast_demos::common::get_dashboard;

fn fmt_cell(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |x| format!("{x:.1}"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load the series (mock in CI when LOADCAST_DEMOS_USE_MOCK is set).
    let dashboard = get_dashboard()?;

    // 2. Start from the initial control values and reveal two days of forecast.
    let defaults = dashboard.control_defaults();
    println!(
        "Series covers {} .. {}; starting at {} {:02}:00",
        defaults.min_date, defaults.max_date, defaults.date, defaults.hour
    );
    let raw = RawRequest::new()
        .date(defaults.date)
        .hour(i64::from(defaults.hour))
        .horizon(48);

    // 3. Run the request and print the tail end of the window.
    let Update::Render(ChartState::Chart(fig)) = dashboard.update(&raw) else {
        println!("Nothing to draw for {raw:?}");
        return Ok(());
    };
    let window = fig.window();
    println!(
        "\n## {} (rows {}..={}, {} points)",
        fig.title(),
        window.first_index(),
        window.last_index(),
        fig.len()
    );
    println!(
        "{:<20} | {:>10} | {:>10} | {:>10} | {:>10}",
        "Time (UTC)", "Actual", "Forecast", "Lower", "Upper"
    );
    println!("{:-<21}|{:-<12}|{:-<12}|{:-<12}|{:-<12}", "", "", "", "", "");

    let skip = fig.len().saturating_sub(56);
    for (i, ts) in fig.timestamps().iter().enumerate().skip(skip).step_by(4) {
        println!(
            "{:<20} | {:>10} | {:>10} | {:>10} | {:>10}",
            ts.format("%Y-%m-%d %H:%M"),
            fmt_cell(fig.values(SeriesRole::Actual)[i]),
            fmt_cell(fig.values(SeriesRole::Forecast)[i]),
            fmt_cell(fig.values(SeriesRole::LowerBound)[i]),
            fmt_cell(fig.values(SeriesRole::UpperBound)[i]),
        );
    }

    Ok(())
}
