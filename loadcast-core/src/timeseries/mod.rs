//! Time-series utilities behind the request pipeline.
//!
//! Modules include:
//! - `infer`: infer cadence and locate irregular steps
//! - `window`: resolve a request into an inclusive index range
//! - `align`: extract the four value columns over a window
/// Alignment of the value columns over a display window.
pub mod align;
/// Cadence inference and index regularity helpers.
pub mod infer;
/// Window selection over the forecast-tailed series.
pub mod window;
