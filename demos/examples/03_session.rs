use loadcast::{ChartState, DisplaySession, RawRequest};
use loadcast_demos::common::get_dashboard;

fn describe(state: Option<&ChartState>) -> String {
    match state {
        None => "blank".to_string(),
        Some(ChartState::Chart(fig)) => format!("chart with {} points", fig.len()),
        Some(ChartState::Empty(e)) => format!("empty window from row {}", e.first_index),
        Some(ChartState::Error(e)) => format!("error: {e}"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. One dashboard shared by the process, one session per viewer.
    let dashboard = get_dashboard()?;
    let mut session = DisplaySession::new();
    let d = dashboard.control_defaults();
    let hour = i64::from(d.hour);

    // 2. A viewer fiddling with the controls, one change at a time.
    let steps = [
        ("page load, controls still empty", RawRequest::new()),
        ("date picked", RawRequest::new().date(d.date)),
        ("hour picked", RawRequest::new().date(d.date).hour(hour)),
        ("horizon picked", RawRequest::new().date(d.date).hour(hour).horizon(0)),
        ("horizon typed as 500", RawRequest::new().date(d.date).hour(hour).horizon(500)),
        ("horizon set to 72", RawRequest::new().date(d.date).hour(hour).horizon(72)),
        ("date moved to the last day", RawRequest::new().date(d.max_date).hour(23).horizon(0)),
    ];

    for (label, raw) in steps {
        let update = dashboard.update(&raw);
        let kept = update.keeps_display();
        let shown = describe(session.apply(update));
        println!("{label:<32} -> {shown}{}", if kept { " (kept)" } else { "" });
    }

    if let Some(reason) = session.last_rejection() {
        println!("\nLast rejected input: {reason}");
    }
    println!("Rejected requests: {}", session.rejected());

    Ok(())
}
