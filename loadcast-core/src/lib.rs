//! loadcast-core
//!
//! Domain types and the pure request pipeline behind the loadcast viewer.
//!
//! - `series`: the hourly `EnergySeries` and its records.
//! - `store`: `SeriesStore`, the once-loaded, immutable owner of the series.
//! - `request`: raw control values and their validation into a `WindowRequest`.
//! - `timeseries`: cadence inference, window selection, and series alignment.
//!
//! Every function here is synchronous and side-effect free apart from the
//! initial CSV read, so a loaded store can be shared across threads.
#![warn(missing_docs)]

/// Raw control input and request validation.
pub mod request;
/// Hourly energy series and its records.
pub mod series;
/// Immutable series store loaded once at startup.
pub mod store;
/// Time-series utilities for cadence inference, window selection, and alignment.
pub mod timeseries;
pub mod types;

pub use request::{DateInput, RawRequest, Request, RequestValidator, WindowRequest};
pub use series::{EnergyRecord, EnergySeries, SeriesRole};
pub use store::{ControlDefaults, SeriesStore};
pub use timeseries::align::{AlignedSeries, align};
pub use timeseries::infer::{first_irregular_step, modal_step_seconds};
pub use timeseries::window::{DisplayWindow, EmptyWindow, Selection, WindowSelector, select_window};
pub use types::*;
