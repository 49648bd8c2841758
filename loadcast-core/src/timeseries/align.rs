use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::LoadcastError;
use crate::series::{EnergySeries, SeriesRole};
use crate::timeseries::window::DisplayWindow;

/// Parallel columns over one shared timestamp axis.
///
/// All vectors have the same length; entry `i` of every column belongs to
/// `timestamps[i]`. Missing values stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignedSeries {
    /// Shared, strictly increasing axis.
    pub timestamps: Vec<DateTime<Utc>>,
    /// Measured demand.
    pub actual_load: Vec<Option<f64>>,
    /// Point forecast.
    pub forecast: Vec<Option<f64>>,
    /// Upper edge of the confidence band.
    pub upper_bound: Vec<Option<f64>>,
    /// Lower edge of the confidence band.
    pub lower_bound: Vec<Option<f64>>,
}

impl AlignedSeries {
    /// Number of points on the axis.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// True if the axis is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Column for `role`.
    #[must_use]
    pub fn values(&self, role: SeriesRole) -> &[Option<f64>] {
        match role {
            SeriesRole::Actual => &self.actual_load,
            SeriesRole::Forecast => &self.forecast,
            SeriesRole::UpperBound => &self.upper_bound,
            SeriesRole::LowerBound => &self.lower_bound,
        }
    }
}

/// Extract the four value columns of `series` over `window`.
///
/// No interpolation or gap filling is applied.
///
/// # Errors
/// Returns `InternalInvariant` if the window does not fit inside the series.
pub fn align(
    series: &EnergySeries,
    window: &DisplayWindow,
) -> Result<AlignedSeries, LoadcastError> {
    let rows = series.records().get(window.range()).ok_or_else(|| {
        LoadcastError::internal(format!(
            "window {}..={} exceeds series of length {}",
            window.first_index(),
            window.last_index(),
            series.len()
        ))
    })?;

    let n = rows.len();
    let mut out = AlignedSeries {
        timestamps: Vec::with_capacity(n),
        actual_load: Vec::with_capacity(n),
        forecast: Vec::with_capacity(n),
        upper_bound: Vec::with_capacity(n),
        lower_bound: Vec::with_capacity(n),
    };
    for r in rows {
        out.timestamps.push(r.ts);
        out.actual_load.push(r.actual_load);
        out.forecast.push(r.forecast);
        out.upper_bound.push(r.upper_bound);
        out.lower_bound.push(r.lower_bound);
    }
    Ok(out)
}

#[cfg(feature = "dataframe")]
impl AlignedSeries {
    /// Convert to a polars `DataFrame` with columns `ts` (epoch milliseconds),
    /// `actual_load`, `forecast`, `upper_bound`, `lower_bound`.
    ///
    /// # Errors
    /// Returns `Other` if polars rejects the columns.
    pub fn to_dataframe(&self) -> Result<polars::prelude::DataFrame, LoadcastError> {
        use polars::prelude::{Column, DataFrame};

        let ts: Vec<i64> = self.timestamps.iter().map(DateTime::timestamp_millis).collect();
        DataFrame::new(vec![
            Column::new("ts".into(), ts),
            Column::new("actual_load".into(), self.actual_load.clone()),
            Column::new("forecast".into(), self.forecast.clone()),
            Column::new("upper_bound".into(), self.upper_bound.clone()),
            Column::new("lower_bound".into(), self.lower_bound.clone()),
        ])
        .map_err(|e| LoadcastError::Other(e.to_string()))
    }
}
