use loadcast::{RawRequest, WindowRequest};
use loadcast_demos::common::get_dashboard;
use tracing_subscriber::fmt::format::FmtSpan;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=debug,loadcast=trace,loadcast_core=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    // Loading emits an info event with the row count and index bounds.
    let dashboard = get_dashboard()?;
    let defaults = dashboard.control_defaults();
    tracing::info!(
        date = %defaults.date,
        hour = defaults.hour,
        max_horizon = dashboard.max_horizon(),
        "dashboard ready"
    );

    // A valid request: spans for update, render, and window selection.
    let raw = RawRequest::new()
        .date(defaults.date)
        .hour(i64::from(defaults.hour))
        .horizon(24);
    let _ = dashboard.update(&raw);

    // An invalid horizon: debug event, display kept.
    let _ = dashboard.update(&raw.clone().horizon(500));

    // A start past the last timestamp: warn event, error state.
    let (_, last) = dashboard.store().index_bounds();
    let _ = dashboard.render(&WindowRequest {
        start: last + chrono::TimeDelta::hours(1),
        horizon: 0,
    });

    Ok(())
}
