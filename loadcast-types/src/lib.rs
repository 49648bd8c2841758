//! Shared error, configuration, and constant types for the loadcast workspace.
#![warn(missing_docs)]

mod config;
mod error;

pub use config::{ColumnMap, LoadcastConfig};
pub use error::LoadcastError;

/// Number of trailing forecast points appended to every series.
pub const FORECAST_TAIL_LEN: usize = 120;

/// Largest horizon a request may reveal with the default tail length.
pub const MAX_HORIZON: usize = FORECAST_TAIL_LEN - 1;
