//! loadcast turns an hourly energy demand series with a trailing forecast
//! block into chart-ready windows.
//!
//! Overview
//! - The series is loaded once (CSV, or any pre-built `SeriesStore`) and never
//!   mutated afterwards.
//! - Each change of the date, hour, or horizon control runs one pure pass:
//!   validate the raw values, select the index window, align the four value
//!   columns on one time axis, and wrap them in a `Figure`.
//! - The last `forecast_tail_len` (120) records are the forecast block. A
//!   horizon of `h` reveals the first `h` of them; `h = 0` stops at the
//!   historical/forecast boundary.
//!
//! Outcomes
//! - Partial input: `Update::Unchanged`.
//! - Complete but invalid input: `Update::Rejected`; the display is kept.
//! - A start past the visible boundary: `ChartState::Empty`, not an error.
//! - A start after the last timestamp: `ChartState::Error`.
//!
//! ```rust,ignore
//! use loadcast::{Dashboard, DisplaySession, RawRequest};
//!
//! let dashboard = Dashboard::builder().data_path("datos_energia.csv").build()?;
//! let defaults = dashboard.control_defaults();
//!
//! let mut session = DisplaySession::new();
//! let raw = RawRequest::new()
//!     .date(defaults.date)
//!     .hour(i64::from(defaults.hour))
//!     .horizon(48);
//! if let Some(state) = session.apply(dashboard.update(&raw)) {
//!     // hand `state` to the renderer
//! }
//! ```
//!
//! See `demos/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

/// Renderer-agnostic chart description and update outcomes.
pub mod chart;
pub(crate) mod core;
mod session;

pub use chart::{ChartState, Figure, LayoutStyle, TraceStyle, Update};
pub use core::{Dashboard, DashboardBuilder};
pub use session::DisplaySession;

// Re-export core types for convenience
pub use loadcast_core::{
    AlignedSeries, ControlDefaults, DateInput, DisplayWindow, EmptyWindow, EnergyRecord,
    EnergySeries, RawRequest, Request, Selection, SeriesRole, SeriesStore, WindowRequest,
};
pub use loadcast_types::{ColumnMap, FORECAST_TAIL_LEN, LoadcastConfig, LoadcastError, MAX_HORIZON};
