use loadcast::{LoadcastConfig, RawRequest, Update};
use loadcast_demos::common::get_dashboard_with;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Configuration as it would arrive from a file; unset fields keep defaults.
    let cfg = LoadcastConfig::from_json_str(
        r#"{
            "default_lookback_hours": 72,
            "sort_on_load": true,
            "columns": { "actual_load": "AT_load_actual_entsoe_transparency" }
        }"#,
    )?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);

    // 2. Build and render the initial view.
    let dashboard = get_dashboard_with(cfg)?;
    let d = dashboard.control_defaults();
    println!("\nControl defaults: {}", serde_json::to_string(&d)?);

    let update = dashboard.update(
        &RawRequest::new()
            .date(d.date)
            .hour(i64::from(d.hour))
            .horizon(6),
    );

    // 3. What a front end would receive, minus the bulk of the data.
    if let Update::Render(state) = &update {
        let mut json = serde_json::to_value(state)?;
        if let Some(data) = json.pointer_mut("/value/data") {
            *data = serde_json::Value::String("<omitted>".into());
        }
        println!("\n{}", serde_json::to_string_pretty(&json)?);
    }

    Ok(())
}
