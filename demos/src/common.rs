use loadcast::{Dashboard, LoadcastConfig, LoadcastError};
use loadcast_mock::MockSeries;

/// Hours of synthetic data served in mock mode (six weeks).
const MOCK_LEN: usize = 6 * 7 * 24;

/// Return a dashboard for demos.
///
/// With `LOADCAST_DEMOS_USE_MOCK` set, the series is synthetic. Otherwise the
/// CSV named by `LOADCAST_DATA` is loaded, falling back to `datos_energia.csv`
/// in the working directory.
///
/// # Errors
/// Returns `DataLoad` if the CSV cannot be loaded.
pub fn get_dashboard() -> Result<Dashboard, LoadcastError> {
    get_dashboard_with(LoadcastConfig::default())
}

/// Like [`get_dashboard`], but with a caller-supplied configuration.
///
/// # Errors
/// Returns `Config` for an invalid configuration and `DataLoad` if the CSV
/// cannot be loaded.
pub fn get_dashboard_with(mut cfg: LoadcastConfig) -> Result<Dashboard, LoadcastError> {
    if std::env::var("LOADCAST_DEMOS_USE_MOCK").is_ok() {
        println!("--- (Using mock series for CI) ---");
        let store = MockSeries::new(MOCK_LEN)
            .tail_len(cfg.forecast_tail_len)
            .store(&cfg)?;
        return Dashboard::builder().config(cfg).store(store).build();
    }
    if cfg.data_path.is_none() {
        let path = std::env::var("LOADCAST_DATA").unwrap_or_else(|_| "datos_energia.csv".into());
        cfg.data_path = Some(path.into());
    }
    Dashboard::builder().config(cfg).build()
}
