use loadcast::{ChartState, MAX_HORIZON, WindowRequest};
use loadcast_core::modal_step_seconds;
use loadcast_demos::common::get_dashboard;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = get_dashboard()?;
    let store = dashboard.store();

    let timestamps: Vec<_> = store.series().records().iter().map(|r| r.ts).collect();
    println!(
        "{} rows, cadence {}s, forecast block starts at row {:?}",
        store.len(),
        modal_step_seconds(&timestamps).unwrap_or_default(),
        store.forecast_boundary(dashboard.config().forecast_tail_len),
    );

    // Fixed start, growing horizon: the window end walks into the forecast block.
    let defaults = dashboard.control_defaults();
    let start = defaults
        .date
        .and_hms_opt(defaults.hour, 0, 0)
        .ok_or("invalid default start")?
        .and_utc();

    println!("\n{:>7} | {:>6} | {:>6} | {:<20}", "horizon", "first", "last", "window end (UTC)");
    println!("{:-<8}|{:-<8}|{:-<8}|{:-<21}", "", "", "", "");
    for horizon in [0, 1, 12, 24, 48, 96, MAX_HORIZON] {
        match dashboard.render(&WindowRequest { start, horizon }) {
            ChartState::Chart(fig) => {
                let w = fig.window();
                let end = fig.timestamps().last().map(|t| t.format("%Y-%m-%d %H:%M"));
                println!(
                    "{horizon:>7} | {:>6} | {:>6} | {:<20}",
                    w.first_index(),
                    w.last_index(),
                    end.map(|e| e.to_string()).unwrap_or_default()
                );
            }
            ChartState::Empty(e) => {
                println!("{horizon:>7} | {:>6} | {:>6} | (empty)", e.first_index, "-");
            }
            ChartState::Error(e) => println!("{horizon:>7} | error: {e}"),
        }
    }

    Ok(())
}
